//! Phone Number Input
//!
//! A telephone field that drops non-digits as they are typed and submits on
//! Enter. The parent owns the value; this component only reports edits.

use dioxus::prelude::*;
use referral_core::phone::digits_only;

/// Properties for the PhoneInput component
#[derive(Clone, PartialEq, Props)]
pub struct PhoneInputProps {
    /// Current digits
    pub value: String,
    /// Called with the digits-only value after each edit
    pub oninput: EventHandler<String>,
    /// Called when Enter is pressed with a non-empty value
    #[props(default)]
    pub onsubmit: Option<EventHandler<()>>,
    #[props(default = "Утасны дугаар".to_string())]
    pub placeholder: String,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = false)]
    pub autofocus: bool,
}

/// Digits-only phone field
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     PhoneInput {
///         value: state.sheet.phone.value().to_string(),
///         oninput: move |digits: String| controller.set_phone(&digits),
///         onsubmit: move |_| submit(),
///     }
/// }
/// ```
#[component]
pub fn PhoneInput(props: PhoneInputProps) -> Element {
    let can_submit = !props.value.is_empty() && !props.disabled;

    rsx! {
        div { class: "form-field phone-field",
            input {
                class: "input-field phone-input",
                r#type: "tel",
                "inputmode": "numeric",
                autocomplete: "tel",
                autofocus: props.autofocus,
                value: "{props.value}",
                placeholder: "{props.placeholder}",
                disabled: props.disabled,
                oninput: move |e| props.oninput.call(digits_only(&e.value())),
                onkeydown: move |e: KeyboardEvent| {
                    if e.key() == Key::Enter && can_submit {
                        if let Some(handler) = &props.onsubmit {
                            handler.call(());
                        }
                    }
                },
            }
        }
    }
}
