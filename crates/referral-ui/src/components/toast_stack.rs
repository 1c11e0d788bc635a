//! Toast Stack
//!
//! Renders the relay's visible toasts in arrival order, each with a close
//! button that dismisses it early.

use dioxus::prelude::*;
use referral_core::{Toast, ToastId, ToastKind};

use super::CloseButton;

/// CSS class for a toast of `kind`
pub fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    }
}

fn toast_icon(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "\u{2713}",
        ToastKind::Error => "!",
    }
}

/// Properties for the ToastStack component
#[derive(Clone, PartialEq, Props)]
pub struct ToastStackProps {
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    /// Called when a toast's close button is pressed
    pub ondismiss: EventHandler<ToastId>,
}

#[component]
pub fn ToastStack(props: ToastStackProps) -> Element {
    if props.toasts.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "toast-stack", role: "status", "aria-live": "polite",
            for toast in props.toasts.iter() {
                div { key: "{toast.id}", class: toast_class(toast.kind),
                    span { class: "toast-icon", "{toast_icon(toast.kind)}" }
                    span { class: "toast-message", "{toast.message}" }
                    CloseButton {
                        onclick: {
                            let id = toast.id;
                            move |_| props.ondismiss.call(id)
                        },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_classes_by_kind() {
        assert_eq!(toast_class(ToastKind::Success), "toast toast-success");
        assert_eq!(toast_class(ToastKind::Error), "toast toast-error");
    }

    #[test]
    fn toast_icons_differ() {
        assert_ne!(toast_icon(ToastKind::Success), toast_icon(ToastKind::Error));
    }
}
