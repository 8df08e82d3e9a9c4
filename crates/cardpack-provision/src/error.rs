//! Error types for the provisioning function.

use cardpack_store::StoreError;

/// Result type for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Errors that surface to the host platform.
///
/// Only store failures land here. Invalid events and already-provisioned
/// users are absorbed into [`crate::ProvisionOutcome`] and acknowledged.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// A document store operation failed; the platform should redeliver.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
