pub mod disk;
pub mod memory;

use crate::core::account::User;
use crate::core::payment::{self, Transaction};
use crate::core::provider::ProviderId;
use crate::core::quote::SearchQuery;
use anyhow::{Context, Result};
use disk::DiskStore;
use memory::MemoryStore;
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use tracing::{debug, info, warn};

/// A key-value store holding raw JSON values.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed access to everything the app remembers between runs.
pub struct Session {
    store: Box<dyn SessionStore>,
}

impl Session {
    pub const SEARCH_KEY: &'static str = "remitSearch";
    pub const AUTH_KEY: &'static str = "IsLogged";
    pub const CURRENT_USER_KEY: &'static str = "loginUser";
    pub const USERS_KEY: &'static str = "RemitScoutUsers";
    pub const FAVORITES_KEY: &'static str = "favorites";
    pub const TRANSFERS_KEY: &'static str = "transactions";

    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Box::new(DiskStore::open(path)?)))
    }

    /// Reads a JSON value. Values that no longer parse are treated as absent.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_json(key) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "Ignoring unreadable session value");
                Ok(None)
            }
        }
    }

    /// Reads a JSON value, failing when the stored bytes do not parse.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(bytes) = self.store.get(key)? else {
            debug!(key, "Session MISS");
            return Ok(None);
        };
        let value = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse session value `{key}`"))?;
        debug!(key, "Session HIT");
        Ok(Some(value))
    }

    fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)
            .with_context(|| format!("Failed to serialize session value `{key}`"))?;
        self.store.put(key, &bytes)?;
        debug!(key, "Session PUT");
        Ok(())
    }

    pub fn search(&self) -> Result<Option<SearchQuery>> {
        self.get_json(Self::SEARCH_KEY)
    }

    pub fn set_search(&self, query: &SearchQuery) -> Result<()> {
        self.put_json(Self::SEARCH_KEY, query)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.get_json(Self::AUTH_KEY)?.unwrap_or(false))
    }

    /// The signed-in user, `None` when signed out.
    pub fn current_user(&self) -> Result<Option<User>> {
        if !self.is_authenticated()? {
            return Ok(None);
        }
        self.get_json(Self::CURRENT_USER_KEY)
    }

    pub fn sign_in(&self, user: &User) -> Result<()> {
        self.put_json(Self::AUTH_KEY, &true)?;
        self.put_json(Self::CURRENT_USER_KEY, user)?;
        info!(email = %user.email, "Signed in");
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        self.put_json(Self::AUTH_KEY, &false)?;
        self.store.remove(Self::CURRENT_USER_KEY)?;
        info!("Signed out");
        Ok(())
    }

    pub fn users(&self) -> Result<Vec<User>> {
        Ok(self.get_json(Self::USERS_KEY)?.unwrap_or_default())
    }

    pub fn set_users(&self, users: &[User]) -> Result<()> {
        self.put_json(Self::USERS_KEY, users)
    }

    pub fn favorite_ids(&self) -> Result<Vec<ProviderId>> {
        Ok(self.get_json(Self::FAVORITES_KEY)?.unwrap_or_default())
    }

    pub fn set_favorite_ids(&self, ids: &[ProviderId]) -> Result<()> {
        self.put_json(Self::FAVORITES_KEY, ids)
    }

    /// Sample history followed by the transfers submitted from this session.
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        let mut all = payment::sample_transactions();
        let submitted: Vec<Transaction> = self.get_json(Self::TRANSFERS_KEY)?.unwrap_or_default();
        all.extend(submitted);
        Ok(all)
    }

    pub fn record_transfer(&self, transaction: Transaction) -> Result<()> {
        let mut submitted: Vec<Transaction> =
            self.read_json(Self::TRANSFERS_KEY)?.unwrap_or_default();
        submitted.push(transaction);
        self.put_json(Self::TRANSFERS_KEY, &submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payment::TransactionStatus;
    use crate::core::quote::DEFAULT_TRANSFER_LIMIT;

    fn user() -> User {
        User {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            address: String::new(),
            password: "engine".to_string(),
        }
    }

    #[test]
    fn test_search_is_overwritten() {
        let session = Session::in_memory();
        assert!(session.search().unwrap().is_none());

        let first = SearchQuery::new("US", "MX", "100", DEFAULT_TRANSFER_LIMIT).unwrap();
        session.set_search(&first).unwrap();
        assert_eq!(session.search().unwrap(), Some(first));

        let second = SearchQuery::new("GB", "IN", "50", DEFAULT_TRANSFER_LIMIT).unwrap();
        session.set_search(&second).unwrap();
        assert_eq!(session.search().unwrap(), Some(second));
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated().unwrap());
        assert!(session.current_user().unwrap().is_none());

        session.sign_in(&user()).unwrap();
        assert!(session.is_authenticated().unwrap());
        assert_eq!(session.current_user().unwrap(), Some(user()));

        session.sign_out().unwrap();
        assert!(!session.is_authenticated().unwrap());
        assert!(session.current_user().unwrap().is_none());
    }

    #[test]
    fn test_users_and_favorites() {
        let session = Session::in_memory();
        assert!(session.users().unwrap().is_empty());
        session.set_users(&[user()]).unwrap();
        assert_eq!(session.users().unwrap().len(), 1);

        session.set_favorite_ids(&[3, 5]).unwrap();
        assert_eq!(session.favorite_ids().unwrap(), vec![3, 5]);
    }

    #[test]
    fn test_transactions_include_samples_and_submissions() {
        let session = Session::in_memory();
        assert_eq!(session.transactions().unwrap().len(), 3);

        let mut tx = payment::sample_transactions().remove(0);
        tx.id = "4".to_string();
        tx.status = TransactionStatus::Processing;
        session.record_transfer(tx.clone()).unwrap();

        let all = session.transactions().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[3], tx);
    }

    #[test]
    fn test_unreadable_history_is_not_overwritten() {
        let unreadable: &[u8] = b"[{\"amount\":null}]";
        let store = MemoryStore::new();
        store.put(Session::TRANSFERS_KEY, unreadable).unwrap();
        let session = Session::new(Box::new(store.clone()));

        let tx = payment::sample_transactions().remove(0);
        let err = session.record_transfer(tx).unwrap_err();
        assert!(err.to_string().contains("transactions"));
        assert_eq!(
            store.get(Session::TRANSFERS_KEY).unwrap(),
            Some(unreadable.to_vec())
        );
    }

    #[test]
    fn test_oversized_payment_keeps_history() {
        let session = Session::in_memory();
        let provider = &crate::core::provider::default_providers()[0];
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut form = payment::PaymentForm {
            sender_name: "Ada".to_string(),
            recipient_name: "Charles".to_string(),
            amount: "10".to_string(),
            payment_method: "card".to_string(),
            ..Default::default()
        };

        let tx = payment::prepare_transfer(provider, &form, "Mexico", date, &[]).unwrap();
        session.record_transfer(tx).unwrap();
        assert_eq!(session.transactions().unwrap().len(), 4);

        form.amount = "9".repeat(400);
        assert!(payment::prepare_transfer(provider, &form, "Mexico", date, &[]).is_err());
        assert_eq!(session.transactions().unwrap().len(), 4);
    }

    #[test]
    fn test_unreadable_value_is_ignored() {
        let store = MemoryStore::new();
        store.put(Session::USERS_KEY, b"not json").unwrap();
        let session = Session::new(Box::new(store));
        assert!(session.users().unwrap().is_empty());
    }

    #[test]
    fn test_raw_layout_matches_browser_keys() {
        let store = MemoryStore::new();
        let session = Session::new(Box::new(store.clone()));
        session.sign_in(&user()).unwrap();
        assert_eq!(store.get("IsLogged").unwrap(), Some(b"true".to_vec()));
        let raw = store.get("loginUser").unwrap().unwrap();
        let raw = String::from_utf8(raw).unwrap();
        assert!(raw.contains("\"firstName\":\"Ada\""));
    }
}
