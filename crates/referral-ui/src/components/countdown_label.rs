//! Countdown Label
//!
//! Ticks once a second from an absolute expiry and reports the moment it
//! reaches zero exactly once. The tick task belongs to the component and stops
//! when it unmounts or the countdown has expired.
//!
//! The expiry is read once on mount; parents key the label by record id and
//! expiry so a changed expiry mounts a fresh countdown.

use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use referral_core::countdown::ticker;
use referral_core::{remaining, CountdownFormat, ExpiryLatch};

/// Properties for the CountdownLabel component
#[derive(Clone, PartialEq, Props)]
pub struct CountdownLabelProps {
    pub expiry: DateTime<Utc>,
    #[props(default)]
    pub format: CountdownFormat,
    /// Fired once when the countdown reaches zero
    #[props(default)]
    pub onexpire: Option<EventHandler<()>>,
    #[props(default)]
    pub class: Option<String>,
}

#[component]
pub fn CountdownLabel(props: CountdownLabelProps) -> Element {
    let expiry = props.expiry;
    let format = props.format;
    let onexpire = props.onexpire;

    let mut label = use_signal(|| remaining(Utc::now(), expiry).format(format));
    let mut expired = use_signal(|| false);

    use_future(move || async move {
        let mut latch = ExpiryLatch::new(expiry, format);
        // first tick completes immediately, so an expiry already in the past
        // is reported on mount
        let mut ticks = ticker();
        loop {
            ticks.tick().await;
            let tick = latch.observe(Utc::now());
            label.set(tick.label);
            if tick.just_expired {
                tracing::debug!(%expiry, "countdown reached zero");
                expired.set(true);
                if let Some(handler) = onexpire {
                    handler.call(());
                }
                break;
            }
        }
    });

    let class = countdown_class(props.class.as_deref(), expired());

    rsx! {
        span { class: "{class}", "{label}" }
    }
}

fn countdown_class(extra: Option<&str>, expired: bool) -> String {
    let base = if expired { "countdown expired" } else { "countdown" };
    match extra.filter(|c| !c.is_empty()) {
        Some(extra) => format!("{base} {extra}"),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_class_variants() {
        assert_eq!(countdown_class(None, false), "countdown");
        assert_eq!(countdown_class(None, true), "countdown expired");
        assert_eq!(countdown_class(Some("banner"), false), "countdown banner");
        assert_eq!(countdown_class(Some(""), true), "countdown expired");
    }
}
