// ABOUTME: Session lifecycle transitions for the client
// ABOUTME: Single exit point for ending a session, used by user logout and by expiry handling

use flashdeck_core::SessionRecord;
use flashdeck_storage::{AppState, StorageResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::navigation::Navigator;

/// Path of the application root, where the login entry lives
pub const ROOT_PATH: &str = "";

#[derive(Clone)]
pub struct SessionManager {
    state: Arc<AppState>,
    navigator: Arc<dyn Navigator>,
}

impl SessionManager {
    pub fn new(state: Arc<AppState>, navigator: Arc<dyn Navigator>) -> Self {
        Self { state, navigator }
    }

    pub fn current(&self) -> Option<SessionRecord> {
        self.state.session().get()
    }

    /// End the current session.
    ///
    /// With `expired` the session record is replaced by `{expired: true}`,
    /// otherwise it is removed. The session cookie is always cleared and the
    /// client is always sent to the application root, even when a storage
    /// write fails; the first storage error is returned afterwards.
    /// Calling this repeatedly leaves the same end state.
    pub fn handle_logout(&self, expired: bool) -> StorageResult<()> {
        let session_result = if expired {
            info!("Session expired, keeping lapsed marker");
            self.state.session().set(Some(SessionRecord::lapsed()))
        } else {
            info!("Logging out");
            self.state.session().remove()
        };
        let cookie_result = self.state.cookie().remove();

        if let Err(e) = &session_result {
            error!("Failed to update session during logout: {}", e);
        }
        if let Err(e) = &cookie_result {
            error!("Failed to clear session cookie during logout: {}", e);
        }

        self.navigator.redirect(ROOT_PATH);
        session_result.and(cookie_result)
    }
}
