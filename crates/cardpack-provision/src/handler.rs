//! The user provisioning handler.

use std::sync::Arc;

use cardpack_core::{AccountCreated, AccountId, ProvisionedUser};
use cardpack_store::{DocumentStore, StoreError};

use crate::error::{ProvisionError, Result};

/// Outcome of handling one account-created event.
///
/// All three variants acknowledge the event; only store failures (returned as
/// errors) ask the platform to redeliver.
#[derive(Debug)]
pub enum ProvisionOutcome {
    /// The user's records were created.
    Provisioned(ProvisionedUser),

    /// A record already existed; nothing was written.
    AlreadyProvisioned {
        /// The account identifier that was already provisioned.
        user_id: AccountId,
    },

    /// The event carried no usable account identifier; nothing was written.
    InvalidEvent,
}

/// Reacts to account-created events by ensuring the user's records exist.
pub struct UserProvisioningHandler {
    store: Arc<dyn DocumentStore>,
}

impl UserProvisioningHandler {
    /// Create a handler backed by the given store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Ensure the user described by `event` is provisioned.
    ///
    /// Validates the payload, then creates the user record, balance
    /// sub-record, and welcome-bonus ledger entry in one atomic store
    /// operation. Safe to re-run for the same account.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::Store` if a store operation fails; the host
    /// platform's retry policy takes over from there.
    pub fn on_account_created(&self, event: &AccountCreated) -> Result<ProvisionOutcome> {
        let Ok(new_user) = event.validate() else {
            tracing::warn!("account-created event has no account identifier, ignoring");
            return Ok(ProvisionOutcome::InvalidEvent);
        };

        match self.store.provision_user(&new_user) {
            Ok(provisioned) => {
                tracing::info!(
                    user_id = %provisioned.user.user_id,
                    credit_balance = provisioned.user.credit_balance,
                    "user provisioned with welcome bonus"
                );
                Ok(ProvisionOutcome::Provisioned(provisioned))
            }
            Err(StoreError::AlreadyExists { user_id }) => {
                tracing::info!(user_id = %user_id, "user already provisioned, skipping");
                Ok(ProvisionOutcome::AlreadyProvisioned {
                    user_id: new_user.user_id,
                })
            }
            Err(err) => Err(ProvisionError::Store(err)),
        }
    }
}
