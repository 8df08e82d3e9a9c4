//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary user documents, keyed by account identifier.
    pub const USERS: &str = "users";

    /// Singleton balance sub-records, keyed by account identifier.
    pub const BALANCES: &str = "balances";

    /// Ledger entries, keyed by `account_id || 0x00 || transaction_id`.
    pub const TRANSACTIONS: &str = "transactions";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::USERS, cf::BALANCES, cf::TRANSACTIONS]
}
