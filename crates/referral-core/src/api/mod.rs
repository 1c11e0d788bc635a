//! Backend client for the referral REST API.
//!
//! The backend is an external collaborator; this module consumes its contract
//! as-is. [`ReferralApi`] is the seam the controller talks to, with
//! [`HttpReferralApi`] as the production adapter.
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | login | POST | `/login` |
//! | getInfo | GET | `/getInfo` |
//! | sendInvitation | POST | `/sendInvitation` |
//! | resendInvitation | POST | `/resendInvitation` |
//! | deleteInvitation | DELETE | `/deleteInvitation` |

pub mod dto;
mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::entry::EntryParams;
use crate::types::{InvitationId, ReferralSnapshot, SessionToken};

pub use http::HttpReferralApi;

/// Errors raised by a backend adapter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connection, TLS or timeout failure
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The envelope's `result` flag reported failure
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Text suitable for a toast or inline error.
    ///
    /// Backend rejection messages are shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(message) if message.is_empty() => {
                "Request rejected by server".to_string()
            }
            ApiError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Acknowledgement of a send/resend/delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    /// Backend message, if it sent a non-empty one
    pub message: Option<String>,
}

/// Operations the referral screen needs from its backend.
#[async_trait]
pub trait ReferralApi: Send + Sync {
    /// Exchange the entry parameters for a session credential.
    async fn login(&self, params: &EntryParams) -> Result<SessionToken, ApiError>;

    /// Fetch the invitation list and entitlement state.
    async fn get_info(&self, token: &SessionToken) -> Result<ReferralSnapshot, ApiError>;

    async fn send_invitation(&self, token: &SessionToken, msisdn: &str) -> Result<Ack, ApiError>;

    async fn resend_invitation(
        &self,
        token: &SessionToken,
        id: &InvitationId,
        msisdn: &str,
    ) -> Result<Ack, ApiError>;

    async fn delete_invitation(
        &self,
        token: &SessionToken,
        id: &InvitationId,
    ) -> Result<Ack, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_is_verbatim() {
        let err = ApiError::Rejected("Дугаар буруу байна".into());
        assert_eq!(err.user_message(), "Дугаар буруу байна");
    }

    #[test]
    fn test_empty_rejection_falls_back_to_display() {
        let err = ApiError::Rejected(String::new());
        assert_eq!(err.user_message(), "Request rejected by server");
    }

    #[test]
    fn test_status_message() {
        let err = ApiError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.user_message(), "Server returned 502: bad gateway");
    }
}
