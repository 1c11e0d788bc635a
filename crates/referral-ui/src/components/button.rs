//! Button Components
//!
//! Button styles used on the referral screen:
//! - Primary: filled red, the main "invite" call to action
//! - Outline: red border, used for resend
//!
//! Delete is an [`IconButton`].

use dioxus::prelude::*;

/// Button style variants
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ButtonVariant {
    /// Main call to action
    #[default]
    Primary,
    /// Bordered secondary action (resend)
    Outline,
}

impl ButtonVariant {
    /// Returns the CSS class for this variant
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Outline => "btn-outline",
        }
    }
}

/// Properties for the Button component
#[derive(Clone, PartialEq, Props)]
pub struct ButtonProps {
    /// Visual style variant
    #[props(default)]
    pub variant: ButtonVariant,
    /// Button content (text, icons, etc.)
    pub children: Element,
    /// Click handler
    #[props(default)]
    pub onclick: Option<EventHandler<()>>,
    /// Whether the button is disabled
    #[props(default = false)]
    pub disabled: bool,
    /// Shows a spinner and blocks clicks while an action is in flight
    #[props(default = false)]
    pub busy: bool,
    /// Optional additional CSS classes
    #[props(default)]
    pub class: Option<String>,
}

/// Styled button
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     Button {
///         onclick: move |_| controller.open_sheet(),
///         "Найзаа урих"
///     }
///
///     Button {
///         variant: ButtonVariant::Outline,
///         busy: resending(),
///         onclick: move |_| resend(id.clone()),
///         "Дахин илгээх"
///     }
/// }
/// ```
#[component]
pub fn Button(props: ButtonProps) -> Element {
    let full_class = button_class(props.variant, props.class.as_deref(), props.busy);
    let blocked = props.disabled || props.busy;

    rsx! {
        button {
            class: "{full_class}",
            r#type: "button",
            disabled: blocked,
            "aria-busy": props.busy,
            onclick: move |_| {
                if blocked {
                    return;
                }
                if let Some(handler) = &props.onclick {
                    handler.call(());
                }
            },
            if props.busy {
                span { class: "btn-spinner" }
            }
            {props.children}
        }
    }
}

fn button_class(variant: ButtonVariant, extra: Option<&str>, busy: bool) -> String {
    let mut class = variant.class().to_string();
    if busy {
        class.push_str(" busy");
    }
    if let Some(extra) = extra.filter(|c| !c.is_empty()) {
        class.push(' ');
        class.push_str(extra);
    }
    class
}

/// Icon button for compact actions (close, delete)
#[derive(Clone, PartialEq, Props)]
pub struct IconButtonProps {
    /// The icon content (character or element)
    pub children: Element,
    /// Click handler
    pub onclick: EventHandler<()>,
    /// Accessible label for screen readers
    pub aria_label: String,
    /// Optional additional CSS classes
    #[props(default)]
    pub class: Option<String>,
}

#[component]
pub fn IconButton(props: IconButtonProps) -> Element {
    let extra_class = props.class.as_deref().unwrap_or("");
    let full_class = if extra_class.is_empty() {
        "icon-btn".to_string()
    } else {
        format!("icon-btn {}", extra_class)
    };

    rsx! {
        button {
            class: "{full_class}",
            "aria-label": "{props.aria_label}",
            onclick: move |_| props.onclick.call(()),
            {props.children}
        }
    }
}

/// Close button with X icon
#[component]
pub fn CloseButton(onclick: EventHandler<()>) -> Element {
    rsx! {
        IconButton {
            onclick: onclick,
            aria_label: "Хаах".to_string(),
            class: "close-btn".to_string(),
            "\u{00D7}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_variant_classes() {
        assert_eq!(ButtonVariant::Primary.class(), "btn-primary");
        assert_eq!(ButtonVariant::Outline.class(), "btn-outline");
    }

    #[test]
    fn button_variant_default() {
        assert_eq!(ButtonVariant::default(), ButtonVariant::Primary);
    }

    #[test]
    fn button_class_composition() {
        assert_eq!(button_class(ButtonVariant::Primary, None, false), "btn-primary");
        assert_eq!(
            button_class(ButtonVariant::Outline, Some("row-action"), true),
            "btn-outline busy row-action"
        );
        assert_eq!(button_class(ButtonVariant::Outline, Some(""), false), "btn-outline");
    }
}
