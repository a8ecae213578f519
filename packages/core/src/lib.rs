// ABOUTME: Core types and constants for the Flashdeck client
// ABOUTME: Foundational package shared by validation, storage, client and CLI packages

pub mod constants;
pub mod types;

// Re-export main types
pub use types::{Permission, PermissionParseError, SessionRecord};

// Re-export constants
pub use constants::{flashdeck_dir, local_storage_file, STORAGE_FILE_NAME};
