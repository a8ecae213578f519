// ABOUTME: Redirect boundary used when a session ends
// ABOUTME: Front ends implement Navigator to move the user to a path ("" is the app root)

/// Moves the client to another location of the application
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to `path`; an empty path is the application root (login entry)
    fn redirect(&self, path: &str);
}

/// Navigator for headless use where there is nowhere to go
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect(&self, path: &str) {
        tracing::debug!("Ignoring redirect to {:?}", path);
    }
}
