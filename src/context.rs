//! Controller context for the referral screen.
//!
//! The controller is built in `main` and handed to the root through the
//! launch builder, so every component reaches the same instance.
//!
//! ## Usage
//!
//! ```ignore
//! // In any component below App
//! let controller = use_controller();
//! let state = use_screen_state();
//!
//! if state.read().sheet.open { ... }
//! spawn(async move { let _ = controller.refresh().await; });
//! ```

use std::sync::Arc;

use dioxus::prelude::*;
use referral_core::{ScreenController, ScreenState};

/// Shared controller type for context.
pub type SharedController = Arc<ScreenController>;

/// Query string the screen was opened with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryQuery(pub String);

/// Hook to access the screen controller from context.
pub fn use_controller() -> SharedController {
    use_context::<SharedController>()
}

/// Hook to access the reactive mirror of the controller's state.
///
/// Provided by `App`; re-renders readers on every controller change.
pub fn use_screen_state() -> Signal<ScreenState> {
    use_context::<Signal<ScreenState>>()
}

/// Run a controller operation in the background.
///
/// Outcomes reach the user through the toast relay and screen state, so the
/// returned result only needs logging here. The task is not tied to the
/// calling component: a delete that removes its own row still finishes.
pub fn spawn_action<F, Fut, T>(label: &'static str, action: F)
where
    F: FnOnce(SharedController) -> Fut + 'static,
    Fut: std::future::Future<Output = referral_core::ReferralResult<T>> + 'static,
{
    // event handlers cannot call hooks, so read the context directly
    let controller = consume_context::<SharedController>();
    spawn_forever(async move {
        if let Err(err) = action(controller).await {
            tracing::debug!(action = label, error = %err, "screen action failed");
        }
    });
}
