//! Document store for cardpack user provisioning.
//!
//! This crate provides persistent storage for user records, balances, and the
//! transaction ledger using `RocksDB` with one column family per record kind.
//!
//! # Architecture
//!
//! - `users`: primary user documents, keyed by account identifier
//! - `balances`: singleton balance sub-records, one per user
//! - `transactions`: ledger entries, keyed by `account_id || 0x00 || ulid` so
//!   a user's entries iterate in chronological order
//!
//! # Example
//!
//! ```no_run
//! use cardpack_core::{AccountId, NewUser};
//! use cardpack_store::{DocumentStore, RocksStore};
//!
//! let store = RocksStore::open("/tmp/cardpack-db").unwrap();
//!
//! let new_user = NewUser {
//!     user_id: AccountId::new("u1").unwrap(),
//!     email: Some("a@b.com".into()),
//!     phone_number: None,
//!     name: None,
//! };
//!
//! let provisioned = store.provision_user(&new_user).unwrap();
//! assert_eq!(provisioned.user.credit_balance, 10);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use cardpack_core::{
    AccountId, BalanceRecord, NewTransaction, NewUser, ProvisionedUser, TransactionRecord,
    UserRecord,
};

/// The storage trait defining all document operations.
///
/// This trait abstracts the storage layer so the provisioning handler can be
/// tested against any backend via an injected `Arc<dyn DocumentStore>`.
/// Timestamps on written records come from the store's clock, never the
/// caller's.
pub trait DocumentStore: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Get a user record by account identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &AccountId) -> Result<Option<UserRecord>>;

    /// Create the initial user record for a new account.
    ///
    /// This is a conditional create, not an upsert.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if a record is already stored
    /// under this identifier.
    fn create_user(&self, new_user: &NewUser) -> Result<UserRecord>;

    // =========================================================================
    // Balance Operations
    // =========================================================================

    /// Get the singleton balance sub-record for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_balance(&self, user_id: &AccountId) -> Result<Option<BalanceRecord>>;

    /// Write the singleton balance sub-record for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_balance(&self, user_id: &AccountId, balance: i64) -> Result<BalanceRecord>;

    // =========================================================================
    // Transaction Ledger Operations
    // =========================================================================

    /// Append a ledger entry under a store-generated, time-ordered key.
    ///
    /// Entries are append-only: nothing updates or deletes them.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn append_transaction(&self, entry: NewTransaction) -> Result<TransactionRecord>;

    /// List ledger entries for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_transactions(
        &self,
        user_id: &AccountId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<TransactionRecord>>;

    // =========================================================================
    // Compound Operations
    // =========================================================================

    /// Provision a new user: create the user record, balance sub-record, and
    /// welcome-bonus ledger entry in one atomic write.
    ///
    /// Either all three records land or none do, so a retried delivery never
    /// observes a half-provisioned user. The existence check runs under the
    /// store's provisioning lock, making this create-if-absent within the
    /// process.
    ///
    /// # Errors
    ///
    /// - `StoreError::AlreadyExists` if the user is already provisioned.
    /// - `StoreError::Database` / `StoreError::Serialization` on backend
    ///   failure; no partial state is left behind.
    fn provision_user(&self, new_user: &NewUser) -> Result<ProvisionedUser>;
}
