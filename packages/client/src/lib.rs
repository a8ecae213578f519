//! Flashdeck API client
//!
//! Session-aware request pipeline for the Flashdeck server: attaches the
//! persisted session to every call, decodes responses into [`ApiResponse`],
//! and ends the session when the server reports the token as expired.

pub mod api;
pub mod client;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod request;
pub mod session;

// Re-export commonly used types and traits
pub use api::{ApiResponse, LoginResponse, ServerResponse};
pub use client::{merge_cookies, ApiClient, SESSION_EXPIRED_MESSAGE};
pub use error::{ClientError, ClientResult};
pub use navigation::{Navigator, NoopNavigator};
pub use notify::{notify_by_response, Notifier, Severity, Toast, ToastQueue};
pub use request::{Method, QueryParam, RequestBody, RequestDescriptor};
pub use session::{SessionManager, ROOT_PATH};
