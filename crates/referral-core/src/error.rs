//! Error types for the referral screen

use thiserror::Error;

use crate::api::ApiError;

/// Main error type for referral screen operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferralError {
    /// A required entry parameter (`tokiId`, `msisdn`) was absent or blank
    #[error("Missing entry parameter: {0}")]
    MissingEntryParameter(&'static str),

    /// Exchanging the entry parameters for a session credential failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Fetching invitation and entitlement state failed
    #[error("Failed to load invitations: {0}")]
    Fetch(String),

    /// A send, resend or delete action failed
    #[error("{action} failed: {reason}")]
    Action {
        /// Which user action failed
        action: ActionKind,
        /// Human readable reason, usually the backend message
        reason: String,
    },

    /// An action needing a credential was issued before login
    #[error("Not authenticated")]
    NotAuthenticated,

    /// No invitation with the given id is currently displayed
    #[error("Invitation not found: {0}")]
    InvitationNotFound(String),

    /// Submit was attempted with an empty phone field
    #[error("Phone number is empty")]
    EmptyPhoneNumber,

    /// Submit was attempted while the previous send is still in flight
    #[error("An invitation is already being sent")]
    SendInProgress,

    /// Client configuration could not be built
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReferralError {
    /// Wrap an adapter error as an action failure.
    pub fn action(action: ActionKind, err: ApiError) -> Self {
        ReferralError::Action {
            action,
            reason: err.user_message(),
        }
    }

    /// Text for a toast or inline banner.
    ///
    /// Action failures show only the reason, which is usually the backend's
    /// own wording.
    pub fn user_message(&self) -> String {
        match self {
            ReferralError::Action { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// User actions that reach the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Send,
    Resend,
    Delete,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Send => write!(f, "Sending invitation"),
            ActionKind::Resend => write!(f, "Resending invitation"),
            ActionKind::Delete => write!(f, "Deleting invitation"),
        }
    }
}

/// Result type alias using ReferralError
pub type ReferralResult<T> = Result<T, ReferralError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReferralError::MissingEntryParameter("tokiId");
        assert_eq!(format!("{}", err), "Missing entry parameter: tokiId");
    }

    #[test]
    fn test_action_display() {
        let err = ReferralError::Action {
            action: ActionKind::Resend,
            reason: "limit reached".to_string(),
        };
        assert_eq!(err.to_string(), "Resending invitation failed: limit reached");
    }

    #[test]
    fn test_action_from_rejection_uses_backend_message() {
        let err = ReferralError::action(
            ActionKind::Send,
            ApiError::Rejected("Number already invited".into()),
        );
        assert_eq!(
            err,
            ReferralError::Action {
                action: ActionKind::Send,
                reason: "Number already invited".into()
            }
        );
    }
}
