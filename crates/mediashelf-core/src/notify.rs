//! User-facing notifications
//!
//! Fire-and-forget: callers never inspect a result. This is a separate
//! channel from logging even though the default implementation forwards to
//! `tracing`.

/// Sink for success and error toasts
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

/// Notifier that emits each notification as a tracing event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, message: &str) {
        tracing::info!(target: "mediashelf::notify", kind = "success", "{}", message);
    }

    fn notify_error(&self, message: &str) {
        tracing::warn!(target: "mediashelf::notify", kind = "error", "{}", message);
    }
}
