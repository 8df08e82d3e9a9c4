//! Key encoding utilities for `RocksDB`.
//!
//! Account identifiers are variable-length provider strings, so composite
//! transaction keys use a `0x00` separator between the identifier and the
//! fixed 16-byte ULID. The separator also terminates iteration prefixes,
//! keeping `u1` from matching entries under `u10`.

use cardpack_core::{AccountId, TransactionId};

/// Byte separating the account identifier from the ULID in composite keys.
const KEY_SEPARATOR: u8 = 0x00;

/// Create a user document key from an account identifier.
#[must_use]
pub fn user_key(user_id: &AccountId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create the singleton balance key for a user.
#[must_use]
pub fn balance_key(user_id: &AccountId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create a ledger entry key.
///
/// Format: `account_id || 0x00 || transaction_id (16 bytes)`
///
/// ULIDs are time-ordered, so a user's entries iterate chronologically.
#[must_use]
pub fn transaction_key(user_id: &AccountId, transaction_id: &TransactionId) -> Vec<u8> {
    let mut key = Vec::with_capacity(user_id.as_bytes().len() + 17);
    key.extend_from_slice(user_id.as_bytes());
    key.push(KEY_SEPARATOR);
    key.extend_from_slice(&transaction_id.to_bytes());
    key
}

/// Create a prefix for iterating all ledger entries for a user.
#[must_use]
pub fn user_transactions_prefix(user_id: &AccountId) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(user_id.as_bytes().len() + 1);
    prefix.extend_from_slice(user_id.as_bytes());
    prefix.push(KEY_SEPARATOR);
    prefix
}

/// Extract the transaction ID from a ledger entry key.
///
/// # Panics
///
/// Panics if the key is shorter than 16 bytes.
#[must_use]
pub fn extract_transaction_id(key: &[u8]) -> TransactionId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[key.len() - 16..]);
    TransactionId::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(raw: &str) -> AccountId {
        AccountId::new(raw).unwrap()
    }

    #[test]
    fn transaction_key_format() {
        let user_id = account("u1");
        let tx_id = TransactionId::generate();
        let key = transaction_key(&user_id, &tx_id);

        assert_eq!(key.len(), 2 + 1 + 16);
        assert_eq!(&key[..2], b"u1".as_slice());
        assert_eq!(key[2], 0x00);
        assert_eq!(&key[3..], tx_id.to_bytes().as_slice());
    }

    #[test]
    fn prefix_distinguishes_similar_ids() {
        let key = transaction_key(&account("u10"), &TransactionId::generate());
        let prefix = user_transactions_prefix(&account("u1"));
        assert!(!key.starts_with(&prefix));

        let own_prefix = user_transactions_prefix(&account("u10"));
        assert!(key.starts_with(&own_prefix));
    }

    #[test]
    fn extract_transaction_id_roundtrip() {
        let tx_id = TransactionId::generate();
        let key = transaction_key(&account("some-longer-uid"), &tx_id);
        assert_eq!(extract_transaction_id(&key), tx_id);
    }
}
