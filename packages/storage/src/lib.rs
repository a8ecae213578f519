// ABOUTME: Persistence layer for Flashdeck client state
// ABOUTME: Durable key-value backends and watch-backed stores with a single owner per key

pub mod backend;
pub mod error;
pub mod state;
pub mod store;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{StorageError, StorageResult};
pub use state::AppState;
pub use store::{Encoding, PersistedStore};
