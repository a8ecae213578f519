// ABOUTME: Application state service owning every persisted client store
// ABOUTME: Session, selected user, person id, permissions and session cookie

use flashdeck_core::constants::{
    COOKIE_KEY, PERMISSIONS_KEY, PERSON_ID_KEY, SELECTED_USER_KEY, SESSION_KEY,
};
use flashdeck_core::{local_storage_file, Permission, SessionRecord};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::backend::{FileStore, KeyValueStore, MemoryStore};
use crate::store::{Encoding, PersistedStore};

/// Shared client state; components depend on this service rather than on
/// the storage backend directly.
pub struct AppState {
    session: PersistedStore<Option<SessionRecord>>,
    selected_user: PersistedStore<Option<Value>>,
    person_id: PersistedStore<String>,
    permissions: PersistedStore<Vec<Permission>>,
    cookie: PersistedStore<String>,
}

impl AppState {
    /// Read every store's initial value from `backend`
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let state = Self {
            session: PersistedStore::load(SESSION_KEY, Encoding::Json, backend.clone(), None),
            selected_user: PersistedStore::load(
                SELECTED_USER_KEY,
                Encoding::Json,
                backend.clone(),
                None,
            ),
            person_id: PersistedStore::load(
                PERSON_ID_KEY,
                Encoding::Plain,
                backend.clone(),
                String::new(),
            ),
            permissions: PersistedStore::load(
                PERMISSIONS_KEY,
                Encoding::Json,
                backend.clone(),
                Vec::new(),
            ),
            cookie: PersistedStore::load(COOKIE_KEY, Encoding::Plain, backend, String::new()),
        };
        debug!(
            "Loaded client state (session present: {})",
            state.session.get().is_some()
        );
        state
    }

    /// State persisted in `local_storage.json` inside `dir`
    pub fn open(dir: &Path) -> Self {
        Self::load(Arc::new(FileStore::new(local_storage_file(dir))))
    }

    pub fn in_memory() -> Self {
        Self::load(Arc::new(MemoryStore::new()))
    }

    pub fn session(&self) -> &PersistedStore<Option<SessionRecord>> {
        &self.session
    }

    pub fn selected_user(&self) -> &PersistedStore<Option<Value>> {
        &self.selected_user
    }

    pub fn person_id(&self) -> &PersistedStore<String> {
        &self.person_id
    }

    pub fn permissions(&self) -> &PersistedStore<Vec<Permission>> {
        &self.permissions
    }

    pub fn cookie(&self) -> &PersistedStore<String> {
        &self.cookie
    }

    pub fn is_admin(&self) -> bool {
        self.permissions.get().contains(&Permission::Admin)
    }
}
