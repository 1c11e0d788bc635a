//! Transient success/error notifications.
//!
//! The relay is the single place user-facing outcomes end up. Toasts stack in
//! arrival order and remove themselves after their duration unless dismissed
//! first. Views subscribe to the watch channel and re-render on change.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use ulid::Ulid;

/// Default lifetime of a toast.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Unique toast identifier (time + randomness)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(Ulid);

impl ToastId {
    fn generate() -> Self {
        Self(Ulid::new())
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Queue of visible toasts with timed auto-removal.
///
/// Cloning is cheap; clones share the same queue.
#[derive(Clone)]
pub struct ToastRelay {
    toasts: Arc<watch::Sender<Vec<Toast>>>,
    default_duration: Duration,
}

impl Default for ToastRelay {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl fmt::Debug for ToastRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastRelay")
            .field("visible", &self.toasts.borrow().len())
            .field("default_duration", &self.default_duration)
            .finish()
    }
}

impl ToastRelay {
    pub fn new(default_duration: Duration) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            toasts: Arc::new(tx),
            default_duration,
        }
    }

    pub fn success(&self, message: impl Into<String>) -> Option<ToastId> {
        self.notify(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Option<ToastId> {
        self.notify(ToastKind::Error, message)
    }

    /// Show a toast for the relay's default duration.
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) -> Option<ToastId> {
        self.notify_for(kind, message, self.default_duration)
    }

    /// Show a toast; a zero `duration` keeps it until dismissed.
    ///
    /// Empty messages are dropped and return `None`.
    pub fn notify_for(
        &self,
        kind: ToastKind,
        message: impl Into<String>,
        duration: Duration,
    ) -> Option<ToastId> {
        let message = message.into();
        if message.is_empty() {
            return None;
        }

        let toast = Toast {
            id: ToastId::generate(),
            kind,
            message,
            created_at: Utc::now(),
        };
        let id = toast.id;
        tracing::debug!(%id, ?kind, message = %toast.message, "toast shown");
        self.toasts.send_modify(|toasts| toasts.push(toast));

        if !duration.is_zero() {
            self.schedule_removal(id, duration);
        }
        Some(id)
    }

    /// Remove a toast now. Returns false if it was already gone.
    pub fn dismiss(&self, id: &ToastId) -> bool {
        self.toasts.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| &t.id != id);
            toasts.len() != before
        })
    }

    /// Snapshot of visible toasts in arrival order.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.toasts.subscribe()
    }

    fn schedule_removal(&self, id: ToastId, duration: Duration) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let relay = self.clone();
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    if relay.dismiss(&id) {
                        tracing::trace!(%id, "toast expired");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(%id, "no runtime for toast expiry; toast stays until dismissed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_duration() {
        let relay = ToastRelay::default();
        relay.success("Invitation sent").unwrap();

        tokio::time::sleep(Duration::from_millis(2999)).await;
        settle().await;
        assert_eq!(relay.toasts().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert!(relay.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_before_expiry_makes_timer_noop() {
        let relay = ToastRelay::default();
        let first = relay.error("first").unwrap();
        relay.notify_for(ToastKind::Success, "second", Duration::ZERO);

        assert!(relay.dismiss(&first));
        assert!(!relay.dismiss(&first));

        tokio::time::sleep(Duration::from_millis(3100)).await;
        settle().await;

        let remaining = relay.toasts();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].message, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_persists() {
        let relay = ToastRelay::default();
        relay.notify_for(ToastKind::Error, "sticky", Duration::ZERO);
        tokio::time::sleep(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(relay.toasts().len(), 1);
    }

    #[tokio::test]
    async fn test_toasts_keep_insertion_order_and_unique_ids() {
        let relay = ToastRelay::default();
        let ids: Vec<_> = (0..20)
            .map(|i| relay.success(format!("toast {i}")).unwrap())
            .collect();

        let toasts = relay.toasts();
        assert_eq!(toasts.iter().map(|t| t.id).collect::<Vec<_>>(), ids);

        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_empty_message_is_dropped() {
        let relay = ToastRelay::default();
        assert!(relay.error("").is_none());
        assert!(relay.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let relay = ToastRelay::default();
        let mut rx = relay.subscribe();
        let id = relay.success("hello").unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        relay.dismiss(&id);
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_empty());
    }

    #[test]
    fn test_without_runtime_toast_stays() {
        let relay = ToastRelay::default();
        relay.success("no runtime").unwrap();
        assert_eq!(relay.toasts().len(), 1);
    }
}
