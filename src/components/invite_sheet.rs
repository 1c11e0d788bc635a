//! Bottom sheet for entering a friend's phone number.
//!
//! The handle area can be dragged down to dismiss. While a finger is down the
//! sheet follows it with no transition; on release the [`DragTracker`]
//! decides between closing and snapping back.

use std::time::{Duration, Instant};

use dioxus::prelude::*;
use referral_core::{DragConfig, DragOutcome, DragPhase, DragTracker, ScreenController};
use referral_ui::{Button, PhoneInput};

use crate::context::{spawn_action, use_controller, use_screen_state};

/// Matches the CSS transition on `.sheet`
const CLOSE_ANIMATION: Duration = Duration::from_millis(250);

fn sheet_style(offset: f64, animating: bool) -> String {
    let transition = if animating {
        "transform 250ms ease"
    } else {
        "none"
    };
    format!("transform: translateY({offset:.1}px); transition: {transition};")
}

/// Whether the full-window drag layer should be up
fn captures_pointer(tracker: &DragTracker) -> bool {
    tracker.phase() == DragPhase::Dragging
}

/// Close on a dismissing release, then rearm the tracker once the sheet is
/// off screen.
fn finish_drag(
    controller: &ScreenController,
    mut tracker: Signal<DragTracker>,
    outcome: Option<DragOutcome>,
) {
    if outcome != Some(DragOutcome::Close) {
        return;
    }
    controller.close_sheet();
    spawn(async move {
        tokio::time::sleep(CLOSE_ANIMATION).await;
        tracker.write().reset();
    });
}

#[component]
pub fn InviteSheet() -> Element {
    let controller = use_controller();
    let state = use_screen_state();
    let mut tracker = use_signal(|| DragTracker::new(DragConfig::default()));
    let origin = use_hook(Instant::now);

    let (open, phone, submitting) = {
        let state = state.read();
        (
            state.sheet.open,
            state.sheet.phone.value().to_string(),
            state.sheet.submitting,
        )
    };
    let can_submit = !phone.is_empty() && !submitting;

    let now_ms = move || origin.elapsed().as_secs_f64() * 1000.0;

    let submit = move || spawn_action("send", |c| async move { c.send_invitation().await });

    let (offset, animating, capturing) = {
        let tracker = tracker.read();
        (tracker.offset(), tracker.animating(), captures_pointer(&tracker))
    };
    let style = if open {
        sheet_style(offset, animating)
    } else {
        String::new()
    };

    rsx! {
        div {
            class: if open { "sheet-backdrop visible" } else { "sheet-backdrop" },
            onclick: {
                let controller = controller.clone();
                move |_| controller.close_sheet()
            },
        }
        div {
            class: if open { "sheet open" } else { "sheet" },
            style: "{style}",
            role: "dialog",
            "aria-hidden": !open,

            div {
                class: "sheet-handle-area",
                onpointerdown: move |e: PointerEvent| {
                    tracker.write().pointer_down(e.client_coordinates().y, now_ms());
                },
                div { class: "sheet-handle" }
            }

            div { class: "sheet-title", "Найзаа урих" }
            div { class: "sheet-desc", "Урих найзынхаа утасны дугаарыг оруулна уу." }

            PhoneInput {
                value: phone,
                disabled: submitting,
                autofocus: open,
                oninput: {
                    let controller = controller.clone();
                    move |digits: String| controller.set_phone(&digits)
                },
                onsubmit: move |_| submit(),
            }

            Button {
                class: "sheet-submit".to_string(),
                disabled: !can_submit,
                busy: submitting,
                onclick: move |_| submit(),
                "Урих"
            }
        }

        // Covers the whole window while a drag is live so moves and the
        // release still reach the tracker after the finger leaves the handle.
        if capturing {
            div {
                class: "sheet-drag-layer",
                onpointermove: move |e: PointerEvent| {
                    tracker.write().pointer_move(e.client_coordinates().y, now_ms());
                },
                onpointerup: {
                    let controller = controller.clone();
                    move |_| {
                        let outcome = tracker.write().pointer_up();
                        finish_drag(&controller, tracker, outcome);
                    }
                },
                onpointercancel: {
                    let controller = controller.clone();
                    move |_| {
                        let outcome = tracker.write().pointer_cancel();
                        finish_drag(&controller, tracker, outcome);
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_style_tracks_finger_without_transition() {
        assert_eq!(
            sheet_style(42.0, false),
            "transform: translateY(42.0px); transition: none;"
        );
    }

    #[test]
    fn sheet_style_animates_when_released() {
        assert!(sheet_style(0.0, true).contains("transform 250ms ease"));
    }

    #[test]
    fn drag_layer_is_up_only_while_dragging() {
        let mut tracker = DragTracker::new(DragConfig::default());
        assert!(!captures_pointer(&tracker));

        tracker.pointer_down(100.0, 0.0);
        assert!(captures_pointer(&tracker));

        // finger well below the handle strip; the layer still delivers it
        tracker.pointer_move(400.0, 300.0);
        assert!(captures_pointer(&tracker));
        assert_eq!(tracker.pointer_up(), Some(DragOutcome::Close));
        assert!(!captures_pointer(&tracker));
    }

    #[test]
    fn cancelled_drag_releases_the_layer_and_snaps_back() {
        let mut tracker = DragTracker::new(DragConfig::default());
        tracker.pointer_down(100.0, 0.0);
        tracker.pointer_move(110.0, 100.0);

        assert_eq!(tracker.pointer_cancel(), Some(DragOutcome::SnapBack));
        assert!(!captures_pointer(&tracker));
        assert!(tracker.animating());
        assert_eq!(sheet_style(tracker.offset(), tracker.animating()), sheet_style(0.0, true));
    }
}
