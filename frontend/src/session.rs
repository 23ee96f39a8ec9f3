//! The logged-in user, cached in browser storage between page loads.

use crate::{error::Error, model::RecordId};

const LOGGED_IN_KEY: &str = "isLoggedIn";
const USER_ID_KEY: &str = "user_id";
const NAME_KEY: &str = "name";

/// Persistent string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    fn remove(&self, key: &str) -> Result<(), Error>;
}

/// The browser's `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, Error> {
        web_sys::window()
            .ok_or_else(|| Error::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|_| Error::Storage("localStorage is not accessible".to_string()))?
            .ok_or_else(|| Error::Storage("localStorage is not available".to_string()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| Error::Storage(format!("could not write \"{key}\"")))
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| Error::Storage(format!("could not remove \"{key}\"")))
    }
}

/// The currently authenticated user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: RecordId,
    pub name: String,
    pub logged_in: bool,
}

impl Session {
    pub fn new(user_id: RecordId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            logged_in: true,
        }
    }

    /// Read the cached session, if a user id was stored.
    pub fn load(store: &impl KeyValueStore) -> Option<Session> {
        let user_id = store.get(USER_ID_KEY).filter(|id| !id.is_empty())?;
        let logged_in = store.get(LOGGED_IN_KEY).as_deref() == Some("true");
        let name = store.get(NAME_KEY).unwrap_or_default();

        Some(Session {
            user_id: RecordId::new(user_id),
            name,
            logged_in,
        })
    }

    pub fn save(&self, store: &impl KeyValueStore) -> Result<(), Error> {
        store.set(LOGGED_IN_KEY, if self.logged_in { "true" } else { "false" })?;
        store.set(USER_ID_KEY, self.user_id.as_str())?;
        store.set(NAME_KEY, &self.name)
    }

    /// Forget the cached user. Every key is attempted even if one fails.
    pub fn clear(store: &impl KeyValueStore) -> Result<(), Error> {
        let results = [
            store.remove(LOGGED_IN_KEY),
            store.remove(USER_ID_KEY),
            store.remove(NAME_KEY),
        ];

        results.into_iter().collect()
    }

    /// The session for pages that require a logged-in user.
    pub fn require(store: &impl KeyValueStore) -> Result<Session, Error> {
        Session::load(store)
            .filter(|session| session.logged_in)
            .ok_or(Error::NotLoggedIn)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::{cell::RefCell, collections::HashMap};

    use super::KeyValueStore;
    use crate::error::Error;

    #[derive(Debug, Default)]
    pub struct MemoryStore {
        items: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), Error> {
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), Error> {
            self.items.borrow_mut().remove(key);
            Ok(())
        }
    }
}
