//! Account store contract
//!
//! Defines the durable-store interface the session host depends on, plus an
//! in-memory reference implementation used by tests and standalone runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::account::AccountRecord;
use crate::error::StoreError;

/// Durable lookup/insert/update of accounts keyed by username.
///
/// Absence of an account is a defined result (`Ok(None)`), never an error;
/// callers must check it explicitly instead of inferring existence from
/// anything else. `register_account` is atomic per username: two concurrent
/// registrations for the same name yield exactly one success.
pub trait AccountStore: Send + Sync {
    /// Returns the record for `username` if one exists.
    fn get_account(&self, username: &str) -> Result<Option<AccountRecord>, StoreError>;

    /// Inserts a new record, failing with `DuplicateAccount` if the username
    /// is already taken.
    fn register_account(&self, record: AccountRecord) -> Result<AccountRecord, StoreError>;

    /// Persists the mutated fields of an existing record. Safe to call with
    /// values identical to the stored record.
    fn update_account(&self, record: &AccountRecord) -> Result<(), StoreError>;
}

/// Shared handle to an account store
pub type SharedAccountStore = Arc<dyn AccountStore>;

/// In-memory reference implementation of `AccountStore`.
///
/// Register atomicity comes from the compare-and-insert under the map lock.
/// A poisoned lock surfaces as `StoreError::Unavailable`, the same variant a
/// real backend would use for timeouts or connection failures.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<HashMap<String, AccountRecord>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.lock().map(|map| map.len()).unwrap_or(0)
    }
}

impl AccountStore for MemoryAccountStore {
    fn get_account(&self, username: &str) -> Result<Option<AccountRecord>, StoreError> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| StoreError::Unavailable("account map lock poisoned".into()))?;

        Ok(accounts.get(username).cloned())
    }

    fn register_account(&self, record: AccountRecord) -> Result<AccountRecord, StoreError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| StoreError::Unavailable("account map lock poisoned".into()))?;

        if accounts.contains_key(&record.username) {
            return Err(StoreError::DuplicateAccount(record.username));
        }

        accounts.insert(record.username.clone(), record.clone());
        Ok(record)
    }

    fn update_account(&self, record: &AccountRecord) -> Result<(), StoreError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| StoreError::Unavailable("account map lock poisoned".into()))?;

        match accounts.get_mut(&record.username) {
            Some(stored) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(StoreError::UnknownAccount(record.username.clone())),
        }
    }
}
