// notifier/toast.rs

use crate::model::{Notification, NotificationId, Severity};
use crate::notifier::NotificationSink;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

#[derive(Default)]
struct ToastBoard {
    active: Vec<Notification>,
    timers: HashMap<NotificationId, AbortHandle>,
}

impl ToastBoard {
    fn remove(&mut self, id: NotificationId) -> bool {
        self.timers.remove(&id);
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        before != self.active.len()
    }
}

fn lock(board: &Mutex<ToastBoard>) -> MutexGuard<'_, ToastBoard> {
    board.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Transient notifications that disappear after `ttl` unless dismissed first.
pub struct ToastNotifier {
    board: Arc<Mutex<ToastBoard>>,
    next_id: AtomicU64,
    ttl: Duration,
}

impl ToastNotifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            board: Arc::new(Mutex::new(ToastBoard::default())),
            next_id: AtomicU64::new(0),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Snapshot of the toasts currently on screen, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        lock(&self.board).active.clone()
    }

    pub fn is_active(&self, id: NotificationId) -> bool {
        lock(&self.board).active.iter().any(|n| n.id == id)
    }
}

impl NotificationSink for ToastNotifier {
    fn notify(&self, message: &str, severity: Severity) -> NotificationId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        match severity {
            Severity::Error => warn!("❌ [toast {}] {}", id, message),
            Severity::Success => info!("✅ [toast {}] {}", id, message),
        }

        let mut board = lock(&self.board);
        board.active.push(Notification {
            id,
            message: message.to_string(),
            severity,
            created_at: Utc::now(),
        });

        // The timer is registered under the same lock so an immediate expiry
        // cannot run before its handle is stored.
        match Handle::try_current() {
            Ok(handle) => {
                let shared = Arc::clone(&self.board);
                let ttl = self.ttl;
                let task = handle.spawn(async move {
                    sleep(ttl).await;
                    if lock(&shared).remove(id) {
                        debug!("⌛ [toast {}] expired", id);
                    }
                });
                board.timers.insert(id, task.abort_handle());
            }
            Err(_) => {
                warn!("⚠️ [toast {}] no runtime for expiry, kept until dismissed", id);
            }
        }

        id
    }

    fn dismiss(&self, id: NotificationId) {
        let mut board = lock(&self.board);
        if let Some(timer) = board.timers.get(&id) {
            timer.abort();
        }
        if board.remove(id) {
            debug!("🗑 [toast {}] dismissed", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(10);

    #[tokio::test(start_paused = true)]
    async fn ids_increase() {
        let toasts = ToastNotifier::new(TTL);
        let a = toasts.notify("first", Severity::Success);
        let b = toasts.notify("second", Severity::Error);
        assert!(b > a);
        let active = toasts.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[1].message, "second");
        assert_eq!(active[1].severity, Severity::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn toast_expires_after_ttl() {
        let toasts = ToastNotifier::new(TTL);
        let id = toasts.notify("Car added successfully!", Severity::Success);

        sleep(TTL - Duration::from_millis(1)).await;
        assert!(toasts.is_active(id));

        sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(!toasts.is_active(id));
        assert!(toasts.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_removes_early_and_is_idempotent() {
        let toasts = ToastNotifier::new(TTL);
        let keep = toasts.notify("keep", Severity::Success);
        let gone = toasts.notify("gone", Severity::Error);

        toasts.dismiss(gone);
        toasts.dismiss(gone);
        assert!(!toasts.is_active(gone));
        assert!(toasts.is_active(keep));

        sleep(TTL + Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert!(toasts.active().is_empty());

        // Dismissing after expiry is harmless.
        toasts.dismiss(keep);
    }

    #[test]
    fn without_runtime_toasts_stay_until_dismissed() {
        let toasts = ToastNotifier::new(TTL);
        let id = toasts.notify("no timer", Severity::Error);
        assert!(toasts.is_active(id));
        toasts.dismiss(id);
        assert!(toasts.active().is_empty());
    }
}
