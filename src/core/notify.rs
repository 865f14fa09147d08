use thiserror::Error;

use crate::models::{Notice, NoticeKind};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Delivery channel for transient notices (toasts, push, etc.)
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError>;
}

/// Notifier that only writes notices to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        tracing::info!(kind = ?notice.kind, "{}: {}", notice.title, notice.description);
        Ok(())
    }
}

/// Deliver `notice` and return what the user should see.
///
/// A failed delivery is never fatal: it is logged and replaced by an error
/// notice for the caller to show instead. No retry.
pub fn deliver(notifier: &dyn Notifier, notice: Notice) -> Notice {
    match notifier.notify(&notice) {
        Ok(()) => notice,
        Err(e) => {
            tracing::warn!("Failed to deliver notice {:?}: {}", notice.title, e);
            Notice::new(
                NoticeKind::Error,
                "Something went wrong",
                format!("{} could not be delivered. Please try again later.", notice.title),
            )
        }
    }
}
