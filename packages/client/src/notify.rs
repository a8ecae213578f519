// ABOUTME: Notification sink for user-facing toasts
// ABOUTME: Severity levels, an in-memory toast queue and response-driven toasts

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::api::ServerResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// Alert theme class used by the web frontend
    pub fn theme(&self) -> &'static str {
        match self {
            Severity::Info => "alert-info",
            Severity::Success => "alert-success",
            Severity::Error => "alert-error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Success => f.write_str("success"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Receiver of user-facing messages
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Toast with its severity, as queued by [`ToastQueue`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

/// In-memory toast queue drained by whoever renders notifications
#[derive(Default)]
pub struct ToastQueue {
    toasts: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued toast, oldest first
    pub fn drain(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(mut toasts) => toasts.drain(..).collect(),
            Err(_) => {
                warn!("Toast queue lock poisoned, dropping queued toasts");
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().map(|toasts| toasts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, message: &str, severity: Severity) {
        debug!("Queued {} toast: {}", severity, message);
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push_back(Toast {
                message: message.to_string(),
                severity,
            });
        }
    }
}

/// Toast the response message, `Success` when the response succeeded and
/// `Error` otherwise
pub fn notify_by_response(notifier: &dyn Notifier, response: &ServerResponse) {
    let severity = if response.success() {
        Severity::Success
    } else {
        Severity::Error
    };
    notifier.notify(response.message().unwrap_or_default(), severity);
}
