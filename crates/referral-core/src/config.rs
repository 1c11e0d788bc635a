//! Client configuration for the referral backend.

use std::time::Duration;

use url::Url;

use crate::error::{ReferralError, ReferralResult};
use crate::toast::DEFAULT_TOAST_DURATION;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "REFERRAL_API_URL";

/// Environment variable holding an optional request timeout in seconds
pub const TIMEOUT_ENV: &str = "REFERRAL_TIMEOUT_SECS";

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/";

const DEFAULT_USER_AGENT: &str = concat!("referral-core/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL the REST paths are joined onto
    pub base_url: Url,
    /// Per-request timeout; `None` leaves it to the transport
    pub request_timeout: Option<Duration>,
    pub toast_duration: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            request_timeout: None,
            toast_duration: DEFAULT_TOAST_DURATION,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url`.
    pub fn new(base_url: &str) -> ReferralResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Read `REFERRAL_API_URL` and `REFERRAL_TIMEOUT_SECS`, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> ReferralResult<Self> {
        let mut config = match std::env::var(API_URL_ENV) {
            Ok(url) => Self::new(&url)?,
            Err(_) => Self::default(),
        };
        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ReferralError::InvalidConfig(format!("{TIMEOUT_ENV} must be whole seconds"))
            })?;
            config = config.with_timeout(Some(Duration::from_secs(secs)));
        }
        Ok(config)
    }

    /// Point at a different backend, keeping the other settings.
    pub fn with_base_url(mut self, base_url: &str) -> ReferralResult<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Absolute URL for one backend operation.
    pub fn endpoint(&self, path: &str) -> ReferralResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ReferralError::InvalidConfig(format!("bad endpoint {path}: {e}")))
    }
}

/// Parse a base URL, making sure it ends in `/` so joins append.
fn parse_base_url(raw: &str) -> ReferralResult<Url> {
    let raw = raw.trim();
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| ReferralError::InvalidConfig(format!("invalid API URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ReferralError::InvalidConfig(format!(
            "API URL must be http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}
