//! Balance and transaction ledger types.
//!
//! The balance sub-record is a singleton per user under the fixed key
//! `"balance"`. Transactions are append-only: entries are never updated or
//! deleted after they are written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, TransactionId};
use crate::user::SIGNUP_BONUS_CREDITS;

/// Ledger description of the welcome bonus entry.
pub const WELCOME_BONUS_DESCRIPTION: &str = "Welcome bonus credits";

/// Singleton per-user balance sub-record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    /// Current credit balance.
    pub balance: i64,

    /// When the balance was last written (store-assigned).
    pub updated_at: DateTime<Utc>,
}

/// An append-only ledger entry for a credit-affecting event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Unique entry ID (ULID, store-assigned on append).
    pub id: TransactionId,

    /// The user whose balance was affected.
    pub user_id: AccountId,

    /// Amount of the change in credits.
    pub amount: i64,

    /// Type of transaction.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Settlement status.
    pub status: TransactionStatus,

    /// Human-readable description.
    pub description: String,

    /// How the credits were paid for.
    pub payment_method: PaymentMethod,

    /// When the entry was appended (store-assigned).
    pub created_at: DateTime<Utc>,
}

/// A ledger entry before the store assigns its ID and timestamp.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// The user whose balance is affected.
    pub user_id: AccountId,

    /// Amount of the change in credits.
    pub amount: i64,

    /// Type of transaction.
    pub transaction_type: TransactionType,

    /// Settlement status.
    pub status: TransactionStatus,

    /// Human-readable description.
    pub description: String,

    /// How the credits were paid for.
    pub payment_method: PaymentMethod,
}

impl NewTransaction {
    /// Build the welcome-bonus entry appended when a user is provisioned.
    #[must_use]
    pub fn signup_bonus(user_id: AccountId) -> Self {
        Self {
            user_id,
            amount: SIGNUP_BONUS_CREDITS,
            transaction_type: TransactionType::Purchase,
            status: TransactionStatus::Completed,
            description: WELCOME_BONUS_DESCRIPTION.to_string(),
            payment_method: PaymentMethod::SignupBonus,
        }
    }

    /// Materialize the entry with a store-assigned ID and timestamp.
    #[must_use]
    pub fn into_record(self, id: TransactionId, now: DateTime<Utc>) -> TransactionRecord {
        TransactionRecord {
            id,
            user_id: self.user_id,
            amount: self.amount,
            transaction_type: self.transaction_type,
            status: self.status,
            description: self.description,
            payment_method: self.payment_method,
            created_at: now,
        }
    }
}

/// Type of ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Credits were acquired (including the signup bonus).
    Purchase,

    /// Credits were spent.
    Usage,

    /// Credits were returned.
    Refund,
}

/// Settlement status of a ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// The transaction settled.
    Completed,

    /// The transaction is awaiting settlement.
    Pending,

    /// The transaction failed to settle.
    Failed,
}

/// How a credit acquisition was paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Granted at account creation, no payment.
    SignupBonus,

    /// Paid through the card processor.
    Stripe,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_bonus_entry_shape() {
        let user_id = AccountId::new("u1").unwrap();
        let entry = NewTransaction::signup_bonus(user_id);

        assert_eq!(entry.amount, SIGNUP_BONUS_CREDITS);
        assert_eq!(entry.transaction_type, TransactionType::Purchase);
        assert_eq!(entry.status, TransactionStatus::Completed);
        assert_eq!(entry.payment_method, PaymentMethod::SignupBonus);
        assert_eq!(entry.description, WELCOME_BONUS_DESCRIPTION);
    }

    #[test]
    fn transaction_record_field_names() {
        let user_id = AccountId::new("u1").unwrap();
        let record = NewTransaction::signup_bonus(user_id)
            .into_record(TransactionId::generate(), Utc::now());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["amount"], 10);
        assert_eq!(json["type"], "purchase");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["paymentMethod"], "signup_bonus");
        assert_eq!(json["description"], "Welcome bonus credits");
    }

    #[test]
    fn balance_record_field_names() {
        let record = BalanceRecord {
            balance: 10,
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["balance"], 10);
        assert!(json.get("updatedAt").is_some());
    }
}
