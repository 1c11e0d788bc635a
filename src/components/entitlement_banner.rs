//! Promotional banner with the active-bonus countdown.

use dioxus::prelude::*;
use referral_core::{CountdownFormat, EntitlementState};
use referral_ui::CountdownLabel;

use crate::context::spawn_action;

#[component]
pub fn EntitlementBanner(entitlement: EntitlementState) -> Element {
    rsx! {
        section { class: "banner-card",
            div { class: "banner-text",
                div { class: "banner-subtitle", "Найзаа уриад" }
                div { class: "banner-title", "Датагаа 3 үржүүлээд ав" }
                div { class: "banner-desc",
                    "Toki Mobile-д найзуудаа уриад хүссэн датагаа авах бүрдээ датагаа 3 үржүүлээрэй."
                }
            }

            if entitlement.active {
                div { class: "entitlement",
                    span { class: "entitlement-count",
                        "{entitlement.success_count} найз нэгдсэн"
                    }
                    // keyed so a new expiry restarts the countdown
                    for expiry in entitlement.expiration_date {
                        CountdownLabel {
                            key: "{expiry}",
                            expiry,
                            format: CountdownFormat::Days,
                            class: "entitlement-countdown".to_string(),
                            // the server decides what an ended bonus looks like
                            onexpire: move |_| spawn_action("refresh", |c| async move { c.refresh().await }),
                        }
                    }
                }
            }
        }
    }
}
