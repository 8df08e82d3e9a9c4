//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the
//! `DocumentStore` trait.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use cardpack_core::{
    AccountId, BalanceRecord, NewTransaction, NewUser, ProvisionedUser, TransactionId,
    TransactionRecord, UserRecord,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::DocumentStore;

/// RocksDB-backed document store.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes provisioning so the existence check and the batch write are
    /// create-if-absent within this process.
    provision_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            provision_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl DocumentStore for RocksStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn get_user(&self, user_id: &AccountId) -> Result<Option<UserRecord>> {
        let cf = self.cf(cf::USERS)?;
        let key = keys::user_key(user_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn create_user(&self, new_user: &NewUser) -> Result<UserRecord> {
        let _guard = self
            .provision_lock
            .lock()
            .map_err(|_| StoreError::Database("provision lock poisoned".into()))?;

        if self.get_user(&new_user.user_id)?.is_some() {
            return Err(StoreError::AlreadyExists {
                user_id: new_user.user_id.to_string(),
            });
        }

        let cf = self.cf(cf::USERS)?;
        let user = UserRecord::initial(new_user, Utc::now());
        let value = Self::serialize(&user)?;

        self.db
            .put_cf(&cf, keys::user_key(&new_user.user_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(user)
    }

    // =========================================================================
    // Balance Operations
    // =========================================================================

    fn get_balance(&self, user_id: &AccountId) -> Result<Option<BalanceRecord>> {
        let cf = self.cf(cf::BALANCES)?;
        let key = keys::balance_key(user_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn put_balance(&self, user_id: &AccountId, balance: i64) -> Result<BalanceRecord> {
        let cf = self.cf(cf::BALANCES)?;
        let record = BalanceRecord {
            balance,
            updated_at: Utc::now(),
        };
        let value = Self::serialize(&record)?;

        self.db
            .put_cf(&cf, keys::balance_key(user_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(record)
    }

    // =========================================================================
    // Transaction Ledger Operations
    // =========================================================================

    fn append_transaction(&self, entry: NewTransaction) -> Result<TransactionRecord> {
        let cf = self.cf(cf::TRANSACTIONS)?;

        let record = entry.into_record(TransactionId::generate(), Utc::now());
        let key = keys::transaction_key(&record.user_id, &record.id);
        let value = Self::serialize(&record)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(record)
    }

    fn list_transactions(
        &self,
        user_id: &AccountId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<TransactionRecord>> {
        let cf = self.cf(cf::TRANSACTIONS)?;
        let prefix = keys::user_transactions_prefix(user_id);

        let iter = self.db.iterator_cf(
            &cf,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        // ULID keys iterate oldest first; collect then reverse for newest
        // first.
        let mut values: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            values.push(value.to_vec());
        }
        values.reverse();

        values
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|data| Self::deserialize(&data))
            .collect()
    }

    // =========================================================================
    // Compound Operations
    // =========================================================================

    fn provision_user(&self, new_user: &NewUser) -> Result<ProvisionedUser> {
        let _guard = self
            .provision_lock
            .lock()
            .map_err(|_| StoreError::Database("provision lock poisoned".into()))?;

        if self.get_user(&new_user.user_id)?.is_some() {
            return Err(StoreError::AlreadyExists {
                user_id: new_user.user_id.to_string(),
            });
        }

        // One clock reading for all three records.
        let now = Utc::now();
        let user = UserRecord::initial(new_user, now);
        let balance = BalanceRecord {
            balance: user.credit_balance,
            updated_at: now,
        };
        let transaction = NewTransaction::signup_bonus(new_user.user_id.clone())
            .into_record(TransactionId::generate(), now);

        let cf_users = self.cf(cf::USERS)?;
        let cf_balances = self.cf(cf::BALANCES)?;
        let cf_transactions = self.cf(cf::TRANSACTIONS)?;

        let user_value = Self::serialize(&user)?;
        let balance_value = Self::serialize(&balance)?;
        let transaction_value = Self::serialize(&transaction)?;

        // All three records land atomically or not at all.
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_users, keys::user_key(&new_user.user_id), &user_value);
        batch.put_cf(
            &cf_balances,
            keys::balance_key(&new_user.user_id),
            &balance_value,
        );
        batch.put_cf(
            &cf_transactions,
            keys::transaction_key(&transaction.user_id, &transaction.id),
            &transaction_value,
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(user_id = %new_user.user_id, "provisioning batch committed");

        Ok(ProvisionedUser {
            user,
            balance,
            transaction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardpack_core::{
        PaymentMethod, TransactionStatus, TransactionType, SIGNUP_BONUS_CREDITS,
    };
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn new_user(uid: &str) -> NewUser {
        NewUser {
            user_id: AccountId::new(uid).unwrap(),
            email: Some(format!("{uid}@example.com")),
            phone_number: None,
            name: None,
        }
    }

    #[test]
    fn create_and_get_user() {
        let (store, _dir) = create_test_store();
        let input = new_user("u1");

        let created = store.create_user(&input).unwrap();
        assert_eq!(created.credit_balance, SIGNUP_BONUS_CREDITS);
        assert_eq!(created.created_at, created.updated_at);

        let retrieved = store.get_user(&input.user_id).unwrap().unwrap();
        assert_eq!(retrieved.user_id, input.user_id);
        assert_eq!(retrieved.email.as_deref(), Some("u1@example.com"));
        assert!(retrieved.phone_number.is_none());
        assert!(retrieved.purchased_cards.is_empty());
        assert!(retrieved.liked_cards.is_empty());
    }

    #[test]
    fn create_user_is_conditional() {
        let (store, _dir) = create_test_store();
        let input = new_user("u1");

        store.create_user(&input).unwrap();
        let result = store.create_user(&input);
        assert!(matches!(result, Err(StoreError::AlreadyExists { .. })));
    }

    #[test]
    fn balance_roundtrip() {
        let (store, _dir) = create_test_store();
        let user_id = AccountId::new("u1").unwrap();

        assert!(store.get_balance(&user_id).unwrap().is_none());

        let written = store.put_balance(&user_id, 10).unwrap();
        assert_eq!(written.balance, 10);

        let retrieved = store.get_balance(&user_id).unwrap().unwrap();
        assert_eq!(retrieved.balance, 10);
    }

    #[test]
    fn transactions_append_and_list_newest_first() {
        let (store, _dir) = create_test_store();
        let user_id = AccountId::new("u1").unwrap();

        let first = store
            .append_transaction(NewTransaction::signup_bonus(user_id.clone()))
            .unwrap();

        // ULIDs are generated at append time; ensure distinct timestamps.
        std::thread::sleep(std::time::Duration::from_millis(2));

        let second = store
            .append_transaction(NewTransaction {
                user_id: user_id.clone(),
                amount: -3,
                transaction_type: TransactionType::Usage,
                status: TransactionStatus::Completed,
                description: "Card purchase".into(),
                payment_method: PaymentMethod::Stripe,
            })
            .unwrap();

        let listed = store.list_transactions(&user_id, 10, 0).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id); // Newest first
        assert_eq!(listed[1].id, first.id);

        // Pagination
        let page1 = store.list_transactions(&user_id, 1, 0).unwrap();
        let page2 = store.list_transactions(&user_id, 1, 1).unwrap();
        assert_eq!(page1[0].id, second.id);
        assert_eq!(page2[0].id, first.id);
    }

    #[test]
    fn transactions_isolated_between_users() {
        let (store, _dir) = create_test_store();
        let u1 = AccountId::new("u1").unwrap();
        let u10 = AccountId::new("u10").unwrap();

        store
            .append_transaction(NewTransaction::signup_bonus(u10.clone()))
            .unwrap();

        assert!(store.list_transactions(&u1, 10, 0).unwrap().is_empty());
        assert_eq!(store.list_transactions(&u10, 10, 0).unwrap().len(), 1);
    }

    #[test]
    fn provision_writes_all_three_records() {
        let (store, _dir) = create_test_store();
        let input = new_user("u1");

        let provisioned = store.provision_user(&input).unwrap();
        assert_eq!(provisioned.user.credit_balance, SIGNUP_BONUS_CREDITS);
        assert_eq!(provisioned.balance.balance, SIGNUP_BONUS_CREDITS);
        assert_eq!(provisioned.transaction.amount, SIGNUP_BONUS_CREDITS);

        let user = store.get_user(&input.user_id).unwrap().unwrap();
        assert_eq!(user.credit_balance, SIGNUP_BONUS_CREDITS);

        let balance = store.get_balance(&input.user_id).unwrap().unwrap();
        assert_eq!(balance.balance, SIGNUP_BONUS_CREDITS);

        let transactions = store.list_transactions(&input.user_id, 10, 0).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].transaction_type, TransactionType::Purchase);
        assert_eq!(transactions[0].status, TransactionStatus::Completed);
        assert_eq!(transactions[0].payment_method, PaymentMethod::SignupBonus);
        assert_eq!(transactions[0].description, "Welcome bonus credits");
    }

    #[test]
    fn provision_shares_one_timestamp() {
        let (store, _dir) = create_test_store();

        let provisioned = store.provision_user(&new_user("u1")).unwrap();
        assert_eq!(provisioned.user.created_at, provisioned.user.updated_at);
        assert_eq!(provisioned.user.created_at, provisioned.balance.updated_at);
        assert_eq!(
            provisioned.user.created_at,
            provisioned.transaction.created_at
        );
    }

    #[test]
    fn provision_twice_is_rejected_without_duplicates() {
        let (store, _dir) = create_test_store();
        let input = new_user("u2");

        store.provision_user(&input).unwrap();
        let second = store.provision_user(&input);
        assert!(matches!(second, Err(StoreError::AlreadyExists { .. })));

        // Exactly one of each record.
        assert!(store.get_user(&input.user_id).unwrap().is_some());
        assert_eq!(
            store.get_balance(&input.user_id).unwrap().unwrap().balance,
            SIGNUP_BONUS_CREDITS
        );
        assert_eq!(
            store.list_transactions(&input.user_id, 10, 0).unwrap().len(),
            1
        );
    }

    #[test]
    fn concurrent_provision_creates_exactly_one() {
        let (store, _dir) = create_test_store();
        let store = std::sync::Arc::new(store);
        let input = new_user("u3");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                let input = input.clone();
                std::thread::spawn(move || store.provision_user(&input).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|created| *created)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(
            store.list_transactions(&input.user_id, 10, 0).unwrap().len(),
            1
        );
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let input = new_user("u1");

        {
            let store = RocksStore::open(dir.path()).unwrap();
            store.provision_user(&input).unwrap();
        }

        let store = RocksStore::open(dir.path()).unwrap();
        let user = store.get_user(&input.user_id).unwrap().unwrap();
        assert_eq!(user.credit_balance, SIGNUP_BONUS_CREDITS);
    }
}
