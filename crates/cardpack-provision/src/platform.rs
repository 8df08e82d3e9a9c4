//! The platform boundary.
//!
//! The host platform delivers one JSON event per invocation and reads the
//! process exit status as its acknowledgment signal. This module decodes the
//! envelope and translates handler results into that signal, keeping the
//! handler itself free of platform conventions.

use cardpack_core::AccountCreated;

use crate::error::ProvisionError;
use crate::handler::ProvisionOutcome;

/// Acknowledgment signal sent back to the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// The event is handled; do not redeliver.
    Handled,

    /// The invocation failed transiently; redeliver per the platform's
    /// retry policy.
    Retry,
}

impl Ack {
    /// Translate a handler result into an acknowledgment.
    ///
    /// Every `Ok` outcome acknowledges the event, including the idempotent
    /// short-circuit and the invalid-payload no-op. Only store failures
    /// request redelivery.
    #[must_use]
    pub const fn from_result(result: &Result<ProvisionOutcome, ProvisionError>) -> Self {
        match result {
            Ok(_) => Self::Handled,
            Err(_) => Self::Retry,
        }
    }
}

/// Decode the platform's event envelope into an account-created payload.
///
/// # Errors
///
/// Returns the underlying JSON error if the envelope is not valid JSON. A
/// malformed envelope will never parse on redelivery, so callers should
/// acknowledge it rather than retry.
pub fn decode_event(raw: &[u8]) -> Result<AccountCreated, serde_json::Error> {
    serde_json::from_slice(raw)
}
