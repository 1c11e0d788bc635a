//! Reqwest-backed referral backend adapter.
//!
//! Owns transport details only: request bodies, bearer auth, status mapping
//! and envelope decoding.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::dto::{
    DeleteBody, Envelope, InfoData, LoginBody, LoginData, ResendBody, SendBody,
};
use super::{Ack, ApiError, ReferralApi};
use crate::config::ClientConfig;
use crate::entry::EntryParams;
use crate::types::{InvitationId, ReferralSnapshot, SessionToken};

/// Longest error body kept in an [`ApiError::Status`].
const MAX_ERROR_BODY: usize = 256;

/// HTTP adapter for the referral backend.
#[derive(Debug, Clone)]
pub struct HttpReferralApi {
    client: Client,
    config: ClientConfig,
}

impl HttpReferralApi {
    /// Build an adapter from config.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&SessionToken>,
        body: Option<&B>,
    ) -> Result<Envelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .config
            .endpoint(path)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(%method, %url, "referral request");

        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token.expose());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;

        if !status.is_success() {
            tracing::warn!(%status, path, "referral request failed");
            return Err(map_status_error(status, &bytes));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Decode(format!("invalid JSON from {path}: {e}")))
    }
}

#[async_trait]
impl ReferralApi for HttpReferralApi {
    async fn login(&self, params: &EntryParams) -> Result<SessionToken, ApiError> {
        let body = LoginBody {
            msisdn: &params.msisdn,
            toki_id: &params.toki_id,
        };
        let envelope: Envelope<LoginData> =
            self.call(Method::POST, "login", None, Some(&body)).await?;
        envelope.into_data()?.into_token()
    }

    async fn get_info(&self, token: &SessionToken) -> Result<ReferralSnapshot, ApiError> {
        let envelope: Envelope<InfoData> = self
            .call::<(), _>(Method::GET, "getInfo", Some(token), None)
            .await?;
        ReferralSnapshot::try_from(envelope.into_data()?)
    }

    async fn send_invitation(&self, token: &SessionToken, msisdn: &str) -> Result<Ack, ApiError> {
        let envelope: Envelope<serde_json::Value> = self
            .call(
                Method::POST,
                "sendInvitation",
                Some(token),
                Some(&SendBody { msisdn }),
            )
            .await?;
        envelope.into_ack()
    }

    async fn resend_invitation(
        &self,
        token: &SessionToken,
        id: &InvitationId,
        msisdn: &str,
    ) -> Result<Ack, ApiError> {
        let envelope: Envelope<serde_json::Value> = self
            .call(
                Method::POST,
                "resendInvitation",
                Some(token),
                Some(&ResendBody::new(id, msisdn)),
            )
            .await?;
        envelope.into_ack()
    }

    async fn delete_invitation(
        &self,
        token: &SessionToken,
        id: &InvitationId,
    ) -> Result<Ack, ApiError> {
        let envelope: Envelope<serde_json::Value> = self
            .call(
                Method::DELETE,
                "deleteInvitation",
                Some(token),
                Some(&DeleteBody::new(id)),
            )
            .await?;
        envelope.into_ack()
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Transport("request timed out".into())
    } else if error.is_connect() {
        ApiError::Transport(format!("could not reach server: {error}"))
    } else {
        ApiError::Transport(error.to_string())
    }
}

/// Prefer the envelope message when the error body carries one.
fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    if let Ok(envelope) = serde_json::from_slice::<Envelope<serde_json::Value>>(body) {
        if let Some(message) = envelope.message.filter(|m| !m.trim().is_empty()) {
            return ApiError::Rejected(message);
        }
    }
    let text = String::from_utf8_lossy(body);
    let body = match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.into_owned(),
    };
    ApiError::Status {
        status: status.as_u16(),
        body,
    }
}
