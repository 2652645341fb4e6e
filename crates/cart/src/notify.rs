//! Notification sink and connectivity signal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Fire-and-forget notification channel.
///
/// The cart pushes transient notices and the cross-session "cart
/// changed" signal through this seam; delivery is best effort and never
/// acknowledged.
pub trait NotificationSink: Send + Sync {
    /// Emits an event with an optional JSON detail payload.
    fn notify(&self, event: &str, detail: Option<serde_json::Value>);
}

/// A signal observed by subscribers of a [`BroadcastNotifier`].
#[derive(Debug, Clone)]
pub struct CartSignal {
    /// Event name, e.g. `cart-updated` or `cart-notice`.
    pub event: String,

    /// Optional JSON detail payload.
    pub detail: Option<serde_json::Value>,
}

/// Notification sink backed by a tokio broadcast channel.
///
/// Other parts of the process (background sync, other open sessions)
/// subscribe to observe cart signals. Sending with no subscribers is
/// fine; the signal is simply dropped.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<CartSignal>,
}

impl BroadcastNotifier {
    /// Creates a notifier with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribes to the signal stream.
    pub fn subscribe(&self) -> broadcast::Receiver<CartSignal> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(16)
    }
}

impl NotificationSink for BroadcastNotifier {
    fn notify(&self, event: &str, detail: Option<serde_json::Value>) {
        let _ = self.tx.send(CartSignal {
            event: event.to_string(),
            detail,
        });
    }
}

/// Notification sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl NotificationSink for NullNotifier {
    fn notify(&self, _event: &str, _detail: Option<serde_json::Value>) {}
}

/// Externally maintained connectivity flag.
///
/// The cart reads this to decide whether to attempt the cross-session
/// broadcast; it never computes or flips the flag itself. Cloning shares
/// the underlying flag.
#[derive(Debug, Clone)]
pub struct ConnectivityStatus(Arc<AtomicBool>);

impl ConnectivityStatus {
    /// Creates a status that starts online.
    pub fn online() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Creates a status that starts offline.
    pub fn offline() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Returns the current flag value.
    pub fn is_online(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Updates the flag; called by the environment, not the cart.
    pub fn set_online(&self, online: bool) {
        self.0.store(online, Ordering::Relaxed);
    }
}

impl Default for ConnectivityStatus {
    fn default() -> Self {
        Self::online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_notifier_delivers_to_subscribers() {
        let notifier = BroadcastNotifier::default();
        let mut rx = notifier.subscribe();

        notifier.notify("cart-updated", Some(serde_json::json!({"item_count": 1})));

        let signal = rx.try_recv().unwrap();
        assert_eq!(signal.event, "cart-updated");
        assert_eq!(signal.detail.unwrap()["item_count"], 1);
    }

    #[test]
    fn broadcast_without_subscribers_does_not_panic() {
        let notifier = BroadcastNotifier::default();
        notifier.notify("cart-updated", None);
    }

    #[test]
    fn connectivity_flag_is_shared_between_clones() {
        let status = ConnectivityStatus::online();
        let shared = status.clone();

        assert!(shared.is_online());
        status.set_online(false);
        assert!(!shared.is_online());
    }
}
