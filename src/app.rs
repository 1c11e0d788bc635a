use dioxus::prelude::*;
use referral_ui::use_watch;

use crate::context::{use_controller, EntryQuery};
use crate::pages::ReferralPage;
use crate::theme::GLOBAL_STYLES;

/// Root application component.
///
/// Provides global styles and the reactive screen state, and starts the
/// initial login + load with the entry query.
#[component]
pub fn App() -> Element {
    let controller = use_controller();
    let entry = use_context::<EntryQuery>();

    let state = use_watch({
        let controller = controller.clone();
        move || controller.subscribe()
    });
    use_context_provider(|| state);

    // Initialize once on mount
    use_effect(move || {
        let controller = controller.clone();
        let query = entry.0.clone();
        spawn(async move {
            match controller.initialize_from_query(&query).await {
                Ok(()) => tracing::info!("referral screen ready"),
                Err(e) => tracing::warn!("referral screen failed to load: {}", e),
            }
        });
    });

    rsx! {
        style { {GLOBAL_STYLES} }
        ReferralPage {}
    }
}
