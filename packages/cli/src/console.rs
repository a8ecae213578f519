// ABOUTME: Terminal implementations of the client's notification and redirect sinks
// ABOUTME: Toasts become colored stderr lines; a redirect to the root asks for a new login

use colored::*;
use flashdeck_client::{Navigator, Notifier, Severity};

/// Prints toasts to stderr, colored by severity
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format(message: &str, severity: Severity) -> String {
        match severity {
            Severity::Info => format!("{} {}", "ℹ".cyan().bold(), message),
            Severity::Success => format!("{} {}", "✓".green().bold(), message),
            Severity::Error => format!("{} {}", "✗".red().bold(), message),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if message.is_empty() {
            return;
        }
        eprintln!("{}", Self::format(message, severity));
    }
}

/// There are no pages in a terminal; the root means "log in again"
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect(&self, path: &str) {
        if path.is_empty() {
            eprintln!(
                "{} Run {} to start a new session",
                "→".cyan(),
                "flashdeck login".bold()
            );
        } else {
            tracing::debug!("Ignoring redirect to {}", path);
        }
    }
}
