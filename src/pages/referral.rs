//! The referral landing screen.
//!
//! Banner on top, the "my invites" card pinned to the bottom, the phone sheet
//! and toasts layered above.

use dioxus::prelude::*;
use referral_core::LoadPhase;

use crate::components::{EntitlementBanner, InviteList, InviteSheet, ToastHost};
use crate::context::use_screen_state;

#[component]
pub fn ReferralPage() -> Element {
    let state = use_screen_state();
    let (phase, inline_error, entitlement) = {
        let state = state.read();
        (
            state.phase,
            state.inline_error.clone(),
            state.snapshot.entitlement.clone(),
        )
    };

    rsx! {
        div { class: "screen",
            main { class: "content",
                EntitlementBanner { entitlement }
            }

            section { class: "bottom-card",
                div { class: "bottom-title", "Миний урьсан" }

                if phase == LoadPhase::Loading {
                    div { class: "loading-state",
                        span { class: "spinner" }
                        "Ачаалж байна..."
                    }
                }

                if let Some(message) = inline_error {
                    div { class: "inline-error", role: "alert", "{message}" }
                }

                InviteList { interactive: phase == LoadPhase::Ready }
            }

            InviteSheet {}
            ToastHost {}
        }
    }
}
