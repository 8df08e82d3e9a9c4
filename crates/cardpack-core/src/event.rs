//! The inbound account-created event.
//!
//! The identity provider emits this payload through the host platform when a
//! new account is registered. Delivery is at-least-once, so the same payload
//! may arrive more than once.

use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, IdError};
use crate::user::NewUser;

/// Payload of an account-created event from the identity provider.
///
/// Only `uid` is required, and even that may arrive empty on malformed
/// deliveries. Optional profile fields default to `None` when absent.
/// Unknown envelope fields are ignored so provider-side payload growth does
/// not break decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreated {
    /// The provider's account identifier. Opaque, possibly empty.
    #[serde(default)]
    pub uid: String,

    /// Email address, if the account has one.
    #[serde(default)]
    pub email: Option<String>,

    /// Phone number, if the account has one.
    #[serde(default)]
    pub phone_number: Option<String>,

    /// Display name, if the account has one.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl AccountCreated {
    /// Validate the event into a provisioning input.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EmptyAccountId` if `uid` is missing or empty. The
    /// handler treats that as a non-error no-op, not a failure.
    pub fn validate(&self) -> Result<NewUser, IdError> {
        let user_id = AccountId::new(self.uid.clone())?;
        Ok(NewUser {
            user_id,
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            name: self.display_name.clone(),
        })
    }
}
