//! Hooks bridging core watch channels into Dioxus signals.

use dioxus::prelude::*;
use tokio::sync::watch;

/// Mirror a `watch` channel into a signal.
///
/// `subscribe` runs once on mount. The forwarding task ends with the
/// component or when the sender is dropped.
pub fn use_watch<T>(subscribe: impl FnOnce() -> watch::Receiver<T>) -> Signal<T>
where
    T: Clone + 'static,
{
    let rx = use_hook(subscribe);
    let mut value = use_signal({
        let rx = rx.clone();
        move || rx.borrow().clone()
    });

    use_future(move || {
        let mut rx = rx.clone();
        async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                value.set(next);
            }
            tracing::debug!("watch channel closed");
        }
    });

    value
}
