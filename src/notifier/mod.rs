pub mod toast;

use crate::model::{NotificationId, Severity};

pub use toast::ToastNotifier;

/// Receives user-facing status messages from the session.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity) -> NotificationId;

    /// Removing an id that is already gone is a no-op.
    fn dismiss(&self, id: NotificationId);
}
