//! Core types for the referral screen
//!
//! These are the domain shapes the controller owns. Wire quirks (numeric ids,
//! mixed timestamp encodings, result flags) are resolved in `api::dto` before
//! anything reaches this module.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier for an invitation, as issued by the backend.
///
/// The backend hands ids out either as JSON numbers or strings and expects
/// them back in the same shape, so the wire form is kept alongside the text.
/// Equality, hashing and ordering look at the text only: an id typed on the
/// command line matches a record whose id arrived as a number.
#[derive(Debug, Clone)]
pub struct InvitationId {
    text: String,
    number: Option<i64>,
}

impl InvitationId {
    /// An id that travels as a JSON string.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            number: None,
        }
    }

    /// An id that travels as a JSON number.
    pub fn from_number(n: i64) -> Self {
        Self {
            text: n.to_string(),
            number: Some(n),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the backend sent this id as a number
    pub fn is_numeric(&self) -> bool {
        self.number.is_some()
    }
}

impl PartialEq for InvitationId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for InvitationId {}

impl Hash for InvitationId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for InvitationId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InvitationId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for InvitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for InvitationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for InvitationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.number {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for InvitationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(i64),
            Text(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Number(n) => Self::from_number(n),
            Wire::Text(s) => Self::new(s),
        })
    }
}

/// Server-side status of an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvitationStatus {
    /// The invited friend joined
    Success,
    /// Invitation is out and its countdown is running
    Sent,
    /// Invitation lapsed without being accepted
    Expired,
}

impl InvitationStatus {
    /// Parse the backend spelling (`SUCCESS`, `sent`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Some(Self::Success),
            "sent" => Some(Self::Sent),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Sent => write!(f, "sent"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// One invitation as returned by `getInfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationRecord {
    pub id: InvitationId,
    pub invited_number: String,
    /// Number the friend ported to, if it differs from the invited one
    pub new_number: Option<String>,
    pub status: InvitationStatus,
    pub operator_name: String,
    pub expire_date: DateTime<Utc>,
}

impl InvitationRecord {
    /// Number a resend should target.
    pub fn resend_target(&self) -> &str {
        self.new_number
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.invited_number)
    }

    pub fn is_sent(&self) -> bool {
        self.status == InvitationStatus::Sent
    }
}

/// The bonus-entitlement banner state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementState {
    pub active: bool,
    pub success_count: u32,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Invitation list and entitlement, always refreshed together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralSnapshot {
    pub invitations: Vec<InvitationRecord>,
    pub entitlement: EntitlementState,
}

impl ReferralSnapshot {
    pub fn find(&self, id: &InvitationId) -> Option<&InvitationRecord> {
        self.invitations.iter().find(|r| &r.id == id)
    }
}

/// Session credential returned by `login`.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}
