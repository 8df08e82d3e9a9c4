//! User record types.
//!
//! `UserRecord` is the primary per-user document. It serializes with the
//! camelCase field names the downstream card application reads, and its
//! optional profile fields always serialize as explicit nulls so readers can
//! rely on field presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credits::{BalanceRecord, TransactionRecord};
use crate::ids::AccountId;

/// Credits granted to every newly provisioned user.
pub const SIGNUP_BONUS_CREDITS: i64 = 10;

/// Validated input for provisioning a user.
///
/// Carries no balance, card lists, or timestamps: those are fixed at creation
/// time by the store, which also assigns `created_at`/`updated_at` from its
/// own clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// The account identifier from the identity provider.
    pub user_id: AccountId,

    /// Email address, if the account has one.
    pub email: Option<String>,

    /// Phone number, if the account has one.
    pub phone_number: Option<String>,

    /// Display name, if the account has one.
    pub name: Option<String>,
}

/// The primary per-user document, keyed by account identifier.
///
/// Created exactly once per account; re-provisioning the same identifier is
/// a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// The account identifier (also the document key).
    pub user_id: AccountId,

    /// Email address, or null.
    pub email: Option<String>,

    /// Phone number, or null.
    pub phone_number: Option<String>,

    /// Display name, or null.
    pub name: Option<String>,

    /// Current credit balance. Starts at `SIGNUP_BONUS_CREDITS`.
    pub credit_balance: i64,

    /// Cards the user has purchased. Empty at creation.
    pub purchased_cards: Vec<String>,

    /// Cards the user has liked. Empty at creation.
    pub liked_cards: Vec<String>,

    /// When the record was created (store-assigned).
    pub created_at: DateTime<Utc>,

    /// When the record was last updated (store-assigned).
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build the initial record for a new user.
    ///
    /// `now` is the store's clock, not the caller's, so the three provisioned
    /// records share one consistent timestamp under clock skew.
    #[must_use]
    pub fn initial(new_user: &NewUser, now: DateTime<Utc>) -> Self {
        Self {
            user_id: new_user.user_id.clone(),
            email: new_user.email.clone(),
            phone_number: new_user.phone_number.clone(),
            name: new_user.name.clone(),
            credit_balance: SIGNUP_BONUS_CREDITS,
            purchased_cards: Vec::new(),
            liked_cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// The full set of records written by one provisioning operation.
#[derive(Debug, Clone)]
pub struct ProvisionedUser {
    /// The primary user document.
    pub user: UserRecord,

    /// The singleton balance sub-record.
    pub balance: BalanceRecord,

    /// The welcome-bonus ledger entry.
    pub transaction: TransactionRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new_user() -> NewUser {
        NewUser {
            user_id: AccountId::new("u1").unwrap(),
            email: Some("a@b.com".into()),
            phone_number: None,
            name: None,
        }
    }

    #[test]
    fn initial_record_grants_welcome_bonus() {
        let now = Utc::now();
        let record = UserRecord::initial(&sample_new_user(), now);

        assert_eq!(record.credit_balance, SIGNUP_BONUS_CREDITS);
        assert!(record.purchased_cards.is_empty());
        assert!(record.liked_cards.is_empty());
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn absent_optionals_serialize_as_null() {
        let record = UserRecord::initial(&sample_new_user(), Utc::now());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["userId"], "u1");
        assert_eq!(json["email"], "a@b.com");
        assert!(json["phoneNumber"].is_null());
        assert!(json["name"].is_null());
        assert_eq!(json["creditBalance"], 10);
        assert_eq!(json["purchasedCards"], serde_json::json!([]));
        assert_eq!(json["likedCards"], serde_json::json!([]));
    }
}
