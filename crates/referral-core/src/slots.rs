//! Fixed-length invitation slots shown in the "my invites" card.
//!
//! The card always shows [`DISPLAY_SLOTS`] rows. Records beyond that are not
//! displayed; missing records become "invite a friend" placeholders.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::countdown::{remaining, Remaining};
use crate::types::{InvitationId, InvitationRecord, InvitationStatus};

/// Number of rows the card renders.
pub const DISPLAY_SLOTS: usize = 5;

/// How one row should be presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    /// Empty slot offering the "invite" affordance
    Invite,
    /// Invitation sent, countdown running
    Pending { remaining: Remaining },
    /// Friend joined
    Joined,
    /// Lapsed; offers resend and delete
    Expired {
        /// True when only the local countdown says so
        local: bool,
    },
}

impl SlotState {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, SlotState::Invite)
    }
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySlot {
    pub index: usize,
    pub record: Option<InvitationRecord>,
    pub state: SlotState,
}

impl DisplaySlot {
    fn placeholder(index: usize) -> Self {
        Self {
            index,
            record: None,
            state: SlotState::Invite,
        }
    }
}

/// Presentation state for one record at `now`.
///
/// A Sent record whose expiry has passed, or that the view already flagged
/// through `locally_expired`, is shown as Expired until the server agrees.
pub fn slot_state(
    record: &InvitationRecord,
    now: DateTime<Utc>,
    locally_expired: &HashSet<InvitationId>,
) -> SlotState {
    match record.status {
        InvitationStatus::Success => SlotState::Joined,
        InvitationStatus::Expired => SlotState::Expired { local: false },
        InvitationStatus::Sent => {
            let left = remaining(now, record.expire_date);
            if left.is_expired() || locally_expired.contains(&record.id) {
                SlotState::Expired { local: true }
            } else {
                SlotState::Pending { remaining: left }
            }
        }
    }
}

/// Pad or truncate `records` to exactly [`DISPLAY_SLOTS`] rows, keeping order.
pub fn normalize(
    records: &[InvitationRecord],
    now: DateTime<Utc>,
    locally_expired: &HashSet<InvitationId>,
) -> Vec<DisplaySlot> {
    (0..DISPLAY_SLOTS)
        .map(|index| match records.get(index) {
            Some(record) => DisplaySlot {
                index,
                state: slot_state(record, now, locally_expired),
                record: Some(record.clone()),
            },
            None => DisplaySlot::placeholder(index),
        })
        .collect()
}
