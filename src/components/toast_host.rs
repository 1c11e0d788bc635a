//! Mirrors the controller's toast relay onto the screen.

use dioxus::prelude::*;
use referral_core::ToastId;
use referral_ui::{use_watch, ToastStack};

use crate::context::use_controller;

#[component]
pub fn ToastHost() -> Element {
    let controller = use_controller();
    let toasts = use_watch({
        let controller = controller.clone();
        move || controller.toasts().subscribe()
    });

    rsx! {
        ToastStack {
            toasts: toasts(),
            ondismiss: move |id: ToastId| {
                controller.toasts().dismiss(&id);
            },
        }
    }
}
