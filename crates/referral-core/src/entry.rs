//! Entry context: who opened the screen.
//!
//! The host app opens the page with `?tokiId=...&msisdn=...`. Both values are
//! required before any network call is made.

use url::form_urlencoded;

use crate::error::{ReferralError, ReferralResult};

pub const TOKI_ID_PARAM: &str = "tokiId";
pub const MSISDN_PARAM: &str = "msisdn";

/// Identifying parameters handed over by the host app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryParams {
    pub toki_id: String,
    pub msisdn: String,
}

impl EntryParams {
    /// Build from optional values, rejecting absent or blank ones.
    pub fn new(toki_id: Option<String>, msisdn: Option<String>) -> ReferralResult<Self> {
        let toki_id = required(toki_id, TOKI_ID_PARAM)?;
        let msisdn = required(msisdn, MSISDN_PARAM)?;
        Ok(Self { toki_id, msisdn })
    }

    /// Parse a query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> ReferralResult<Self> {
        let query = query.trim_start_matches('?');
        let mut toki_id = None;
        let mut msisdn = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                TOKI_ID_PARAM => toki_id = Some(value.into_owned()),
                MSISDN_PARAM => msisdn = Some(value.into_owned()),
                _ => {}
            }
        }
        Self::new(toki_id, msisdn)
    }
}

fn required(value: Option<String>, name: &'static str) -> ReferralResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ReferralError::MissingEntryParameter(name))
}
