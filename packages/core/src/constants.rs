use std::env;
use std::path::{Path, PathBuf};

/// File holding the persisted key-value entries inside the data directory
pub const STORAGE_FILE_NAME: &str = "local_storage.json";

// Persisted state keys
pub const SESSION_KEY: &str = "jwt";
pub const SELECTED_USER_KEY: &str = "adminSelectedUser";
pub const PERSON_ID_KEY: &str = "personId";
pub const PERMISSIONS_KEY: &str = "userPermissions";
pub const COOKIE_KEY: &str = "cookie";

// Environment variables
pub const FLASHDECK_API_URL: &str = "FLASHDECK_API_URL";
pub const FLASHDECK_HOME: &str = "FLASHDECK_HOME";
pub const HOME: &str = "HOME";

// API endpoints, relative to the API base URL
pub const LOGIN_ENDPOINT: &str = "/api/login";
pub const LOGOUT_ENDPOINT: &str = "/api/logout";

/// Server response type marking an expired session token
pub const TOKEN_EXPIRED_TYPE: &str = "TokenExpired";

/// Get the path to the Flashdeck directory (~/.flashdeck)
pub fn flashdeck_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var(HOME) {
        PathBuf::from(home).join(".flashdeck")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".flashdeck")
    }
}

/// Get the path to the persisted storage file inside `dir`
pub fn local_storage_file(dir: &Path) -> PathBuf {
    dir.join(STORAGE_FILE_NAME)
}
