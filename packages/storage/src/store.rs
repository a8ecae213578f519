// ABOUTME: Persisted observable store for one key of client state
// ABOUTME: Owns the live value in a watch channel and mirrors every change to the backend

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::backend::KeyValueStore;
use crate::error::StorageResult;

/// How a value is written to its backend entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// JSON document, `null` included
    Json,
    /// Bare string without JSON quoting
    Plain,
}

impl Encoding {
    fn encode<T: Serialize>(&self, value: &T) -> StorageResult<String> {
        match self {
            Encoding::Json => Ok(serde_json::to_string(value)?),
            Encoding::Plain => match serde_json::to_value(value)? {
                Value::String(s) => Ok(s),
                other => Ok(other.to_string()),
            },
        }
    }

    fn decode<T: DeserializeOwned>(&self, raw: &str) -> StorageResult<T> {
        match self {
            Encoding::Json => Ok(serde_json::from_str(raw)?),
            Encoding::Plain => Ok(serde_json::from_value(Value::String(raw.to_string()))?),
        }
    }
}

/// A single piece of client state bound to one backend key.
///
/// The store is the only writer of its key: every `set` goes to the backend
/// first and is then published to subscribers. Readers get the value that is
/// in the backend at call time.
pub struct PersistedStore<T> {
    key: &'static str,
    encoding: Encoding,
    default: T,
    backend: Arc<dyn KeyValueStore>,
    sender: watch::Sender<T>,
}

impl<T> PersistedStore<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Load the initial value from the backend, falling back to `default`
    /// when the entry is missing or unreadable.
    pub fn load(
        key: &'static str,
        encoding: Encoding,
        backend: Arc<dyn KeyValueStore>,
        default: T,
    ) -> Self {
        let initial = read_entry(key, encoding, backend.as_ref()).unwrap_or_else(|| default.clone());

        let (sender, _) = watch::channel(initial);
        Self {
            key,
            encoding,
            default,
            backend,
            sender,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Current value as stored in the backend.
    ///
    /// A missing or undecodable entry reads as the default. When the backend
    /// itself cannot be read the last known value is returned. Changes made
    /// by another owner of the backend are published to subscribers.
    pub fn get(&self) -> T {
        let value = match self.backend.get(self.key) {
            Ok(Some(raw)) => decode_or_warn(self.key, self.encoding, &raw)
                .unwrap_or_else(|| self.default.clone()),
            Ok(None) => self.default.clone(),
            Err(e) => {
                warn!("Failed to read {} from storage: {}", self.key, e);
                return self.sender.borrow().clone();
            }
        };

        self.sender.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            debug!("{} changed in storage", self.key);
            *current = value.clone();
            true
        });
        value
    }

    pub fn set(&self, value: T) -> StorageResult<()> {
        let raw = self.encoding.encode(&value)?;
        self.backend.set(self.key, &raw)?;
        self.sender.send_replace(value);
        debug!("Updated {}", self.key);
        Ok(())
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) -> StorageResult<()> {
        let mut value = self.get();
        f(&mut value);
        self.set(value)
    }

    /// Delete the backend entry and reset the live value to the default
    pub fn remove(&self) -> StorageResult<()> {
        self.backend.remove(self.key)?;
        self.sender.send_replace(self.default.clone());
        debug!("Removed {}", self.key);
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

/// Decoded entry for `key`, or `None` when it is missing or unreadable
fn read_entry<T: DeserializeOwned>(
    key: &str,
    encoding: Encoding,
    backend: &dyn KeyValueStore,
) -> Option<T> {
    match backend.get(key) {
        Ok(Some(raw)) => decode_or_warn(key, encoding, &raw),
        Ok(None) => None,
        Err(e) => {
            warn!("Failed to read {} from storage: {}", key, e);
            None
        }
    }
}

fn decode_or_warn<T: DeserializeOwned>(key: &str, encoding: Encoding, raw: &str) -> Option<T> {
    match encoding.decode::<T>(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unreadable value for {}: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;

    fn backend() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn test_json_store_persists_null() {
        let backend = backend();
        let store: PersistedStore<Option<String>> =
            PersistedStore::load("selected", Encoding::Json, backend.clone(), None);

        store.set(None).unwrap();
        assert_eq!(backend.get("selected").unwrap().as_deref(), Some("null"));

        store.set(Some("bob".to_string())).unwrap();
        assert_eq!(backend.get("selected").unwrap().as_deref(), Some("\"bob\""));
    }

    #[test]
    fn test_plain_store_writes_bare_string() {
        let backend = backend();
        let store = PersistedStore::load("personId", Encoding::Plain, backend.clone(), String::new());

        store.set("7f3c".to_string()).unwrap();

        assert_eq!(backend.get("personId").unwrap().as_deref(), Some("7f3c"));
        let reloaded = PersistedStore::load("personId", Encoding::Plain, backend, String::new());
        assert_eq!(reloaded.get(), "7f3c");
    }

    #[test]
    fn test_unreadable_value_falls_back_to_default() {
        let backend = backend();
        backend.set("userPermissions", "USER,ADMIN").unwrap();

        let store: PersistedStore<Vec<String>> =
            PersistedStore::load("userPermissions", Encoding::Json, backend, Vec::new());

        assert!(store.get().is_empty());
    }

    #[test]
    fn test_remove_resets_default_and_is_idempotent() {
        let backend = backend();
        let store = PersistedStore::load("personId", Encoding::Plain, backend.clone(), String::new());
        store.set("abc".to_string()).unwrap();

        store.remove().unwrap();
        store.remove().unwrap();

        assert_eq!(store.get(), "");
        assert_eq!(backend.get("personId").unwrap(), None);
    }

    #[test]
    fn test_update_applies_closure() {
        let store = PersistedStore::load("list", Encoding::Json, backend(), vec![1u32]);
        store.update(|v| v.push(2)).unwrap();
        assert_eq!(store.get(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = PersistedStore::load("personId", Encoding::Plain, backend(), String::new());
        let mut receiver = store.subscribe();

        store.set("next".to_string()).unwrap();

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), "next");
    }

    #[tokio::test]
    async fn test_get_picks_up_writes_from_another_store() {
        let backend = backend();
        let ours = PersistedStore::load("personId", Encoding::Plain, backend.clone(), String::new());
        let theirs = PersistedStore::load("personId", Encoding::Plain, backend, String::new());
        ours.set("abc".to_string()).unwrap();
        let mut receiver = ours.subscribe();

        theirs.remove().unwrap();

        assert_eq!(ours.get(), "");
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), "");
    }
}
