//! The "my invites" card: always five rows.
//!
//! Each row renders one [`DisplaySlot`]. Pending rows own a countdown that
//! flags the invitation as expired locally when it reaches zero; the next
//! refresh from the server replaces that.

use chrono::Utc;
use dioxus::prelude::*;
use referral_core::{DisplaySlot, InvitationId, InvitationRecord, SlotState};
use referral_ui::{Button, ButtonVariant, CountdownLabel, IconButton};

use crate::context::{spawn_action, use_controller, use_screen_state};

/// Status line shown under the number
fn status_text(state: &SlotState) -> &'static str {
    match state {
        SlotState::Invite => "",
        SlotState::Pending { .. } => "Урилга илгээсэн",
        SlotState::Joined => "Нэгдсэн",
        SlotState::Expired { .. } => "Хугацаа дууссан",
    }
}

fn row_class(state: &SlotState) -> &'static str {
    match state {
        SlotState::Invite => "invite-row",
        SlotState::Pending { .. } => "invite-row pending",
        SlotState::Joined => "invite-row joined",
        SlotState::Expired { .. } => "invite-row expired",
    }
}

/// Rows are keyed by record and expiry so a replaced record remounts its
/// countdown instead of inheriting the old one.
fn row_key(slot: &DisplaySlot) -> String {
    match &slot.record {
        Some(record) => format!("{}-{}", record.id, record.expire_date.timestamp_millis()),
        None => format!("slot-{}", slot.index),
    }
}

/// The row may already be gone once its action finishes.
fn clear_busy(mut busy: Signal<bool>) {
    if let Ok(mut flag) = busy.try_write() {
        *flag = false;
    }
}

#[component]
pub fn InviteList(interactive: bool) -> Element {
    let state = use_screen_state();
    let slots = state.read().slots(Utc::now());

    rsx! {
        div { class: "inner-card",
            for slot in slots {
                InviteRow {
                    key: "{row_key(&slot)}",
                    slot: slot.clone(),
                    interactive,
                }
            }
        }
    }
}

#[component]
pub fn InviteRow(slot: DisplaySlot, interactive: bool) -> Element {
    let controller = use_controller();
    let mut busy = use_signal(|| false);
    let status = status_text(&slot.state);

    let Some(record) = slot.record.clone() else {
        return rsx! {
            div { class: row_class(&slot.state),
                div { class: "left",
                    div { class: "avatar" }
                    div { class: "invite-text", "Найзаа урих" }
                }
                button {
                    class: "add-btn",
                    r#type: "button",
                    "aria-label": "Нэмэх",
                    disabled: !interactive,
                    onclick: move |_| controller.open_sheet(),
                    "+"
                }
            }
        };
    };

    let resend = {
        let id = record.id.clone();
        move |_: ()| {
            let id = id.clone();
            busy.set(true);
            spawn_action("resend", move |c| async move {
                let result = c.resend_invitation(&id).await;
                clear_busy(busy);
                result
            });
        }
    };
    let mut delete = {
        let id = record.id.clone();
        move |_: ()| {
            let id = id.clone();
            busy.set(true);
            spawn_action("delete", move |c| async move {
                let result = c.delete_invitation(&id).await;
                clear_busy(busy);
                result
            });
        }
    };

    rsx! {
        div { class: row_class(&slot.state),
            div { class: "left",
                div { class: "avatar filled" }
                div { class: "invite-info",
                    div { class: "invite-number", "{record.resend_target()}" }
                    div { class: "invite-meta",
                        if !record.operator_name.is_empty() {
                            span { class: "operator", "{record.operator_name}" }
                        }
                        span { class: "status", "{status}" }
                    }
                }
            }

            {match &slot.state {
                SlotState::Pending { .. } => rsx! {
                    PendingCountdown { record: record.clone() }
                },
                SlotState::Expired { .. } => rsx! {
                    div { class: "row-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            busy: busy(),
                            disabled: !interactive,
                            onclick: resend,
                            "Дахин илгээх"
                        }
                        IconButton {
                            aria_label: "Устгах".to_string(),
                            class: "delete-btn".to_string(),
                            onclick: move |_| {
                                if interactive && !busy() {
                                    delete(());
                                }
                            },
                            "\u{1F5D1}"
                        }
                    }
                },
                SlotState::Joined => rsx! {
                    span { class: "joined-badge", "\u{2713}" }
                },
                SlotState::Invite => rsx! {},
            }}
        }
    }
}

/// Countdown for a Sent invitation.
#[component]
fn PendingCountdown(record: InvitationRecord) -> Element {
    let controller = use_controller();
    let id: InvitationId = record.id.clone();

    rsx! {
        CountdownLabel {
            expiry: record.expire_date,
            onexpire: move |_| {
                if controller.mark_expired(&id) {
                    tracing::debug!(%id, "invitation expired locally");
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use referral_core::Remaining;

    #[test]
    fn status_text_by_state() {
        assert_eq!(status_text(&SlotState::Invite), "");
        assert_eq!(
            status_text(&SlotState::Pending {
                remaining: Remaining::from_millis(1000)
            }),
            "Урилга илгээсэн"
        );
        assert_eq!(status_text(&SlotState::Joined), "Нэгдсэн");
        assert_eq!(
            status_text(&SlotState::Expired { local: true }),
            "Хугацаа дууссан"
        );
    }

    #[test]
    fn row_keys_follow_record_identity() {
        let placeholder = DisplaySlot {
            index: 3,
            record: None,
            state: SlotState::Invite,
        };
        assert_eq!(row_key(&placeholder), "slot-3");

        let expiry = Utc::now();
        let record = InvitationRecord {
            id: InvitationId::new("41"),
            invited_number: "88112233".into(),
            new_number: None,
            status: referral_core::InvitationStatus::Sent,
            operator_name: String::new(),
            expire_date: expiry,
        };
        let slot = DisplaySlot {
            index: 0,
            record: Some(record),
            state: SlotState::Joined,
        };
        assert_eq!(
            row_key(&slot),
            format!("41-{}", expiry.timestamp_millis())
        );
    }

    #[test]
    fn row_classes_by_state() {
        assert_eq!(row_class(&SlotState::Invite), "invite-row");
        assert_eq!(row_class(&SlotState::Joined), "invite-row joined");
        assert_eq!(
            row_class(&SlotState::Expired { local: false }),
            "invite-row expired"
        );
    }
}
