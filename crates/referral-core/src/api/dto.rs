//! Wire shapes for the referral backend.
//!
//! Every response is wrapped in `{result, message, data}`. The backend is not
//! strict about encodings, so ids, result flags and timestamps each accept a
//! few spellings and are normalised into the domain types here.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{Ack, ApiError};
use crate::types::{
    EntitlementState, InvitationId, InvitationRecord, InvitationStatus, ReferralSnapshot,
    SessionToken,
};

/// `result` as the backend spells it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResultFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl ResultFlag {
    pub fn is_success(&self) -> bool {
        match self {
            ResultFlag::Bool(ok) => *ok,
            ResultFlag::Int(code) => matches!(code, 1 | 200),
            ResultFlag::Text(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "success" | "ok" | "true"
            ),
        }
    }
}

/// Common response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub result: ResultFlag,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn check(self) -> Result<(Option<T>, Option<String>), ApiError> {
        let message = self.message.filter(|m| !m.trim().is_empty());
        if !self.result.is_success() {
            return Err(ApiError::Rejected(message.unwrap_or_default()));
        }
        Ok((self.data, message))
    }

    /// Payload of a successful response; a missing `data` is a decode error.
    pub fn into_data(self) -> Result<T, ApiError> {
        match self.check()? {
            (Some(data), _) => Ok(data),
            (None, _) => Err(ApiError::Decode("response has no data".into())),
        }
    }

    pub fn into_ack(self) -> Result<Ack, ApiError> {
        let (_, message) = self.check()?;
        Ok(Ack { message })
    }
}

/// Credential returned by `/login`: either a bare string or an object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginData {
    Token(String),
    Object {
        #[serde(alias = "jwt", alias = "accessToken", alias = "access_token")]
        token: String,
    },
}

impl LoginData {
    pub fn into_token(self) -> Result<SessionToken, ApiError> {
        let token = match self {
            LoginData::Token(token) | LoginData::Object { token } => token,
        };
        if token.trim().is_empty() {
            return Err(ApiError::Decode("login returned an empty credential".into()));
        }
        Ok(SessionToken::new(token))
    }
}

/// Numeric or string id
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Text(String),
}

impl From<WireId> for InvitationId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Int(n) => InvitationId::from_number(n),
            WireId::Text(s) => InvitationId::new(s),
        }
    }
}

/// Epoch milliseconds or a date string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireTimestamp {
    Millis(i64),
    Text(String),
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

impl WireTimestamp {
    /// Resolve to UTC. Strings without an offset are taken as UTC.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, ApiError> {
        match self {
            WireTimestamp::Millis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or_else(|| ApiError::Decode(format!("timestamp out of range: {ms}"))),
            WireTimestamp::Text(text) => parse_timestamp(text),
        }
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, ApiError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ApiError::Decode(format!("unrecognised timestamp: {text}")))
}

/// One entry of `getInfo.data.referrals`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralDto {
    pub id: WireId,
    pub invited_number: String,
    #[serde(default)]
    pub new_number: Option<String>,
    pub status: String,
    #[serde(default)]
    pub operator_name: Option<String>,
    pub expire_date: WireTimestamp,
}

impl TryFrom<ReferralDto> for InvitationRecord {
    type Error = ApiError;

    fn try_from(dto: ReferralDto) -> Result<Self, Self::Error> {
        let status = InvitationStatus::parse(&dto.status)
            .ok_or_else(|| ApiError::Decode(format!("unknown invitation status: {}", dto.status)))?;
        Ok(InvitationRecord {
            id: dto.id.into(),
            invited_number: dto.invited_number,
            new_number: dto.new_number.filter(|n| !n.is_empty()),
            status,
            operator_name: dto.operator_name.unwrap_or_default(),
            expire_date: dto.expire_date.to_utc()?,
        })
    }
}

/// `getInfo.data`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoData {
    #[serde(default)]
    pub referrals: Vec<ReferralDto>,
    #[serde(default)]
    pub has_active_entitlement: bool,
    #[serde(default)]
    pub success_referrals_count: u32,
    #[serde(default)]
    pub entitlement_expiration_date: Option<WireTimestamp>,
}

impl TryFrom<InfoData> for ReferralSnapshot {
    type Error = ApiError;

    fn try_from(data: InfoData) -> Result<Self, Self::Error> {
        let invitations = data
            .referrals
            .into_iter()
            .map(InvitationRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let expiration_date = data
            .entitlement_expiration_date
            .as_ref()
            .map(WireTimestamp::to_utc)
            .transpose()?;
        Ok(ReferralSnapshot {
            invitations,
            entitlement: EntitlementState {
                active: data.has_active_entitlement,
                success_count: data.success_referrals_count,
                expiration_date,
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody<'a> {
    pub msisdn: &'a str,
    pub toki_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SendBody<'a> {
    pub msisdn: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendBody<'a> {
    /// Serialized back in the shape it arrived in
    pub invitation_id: &'a InvitationId,
    pub msisdn: &'a str,
}

impl<'a> ResendBody<'a> {
    pub fn new(id: &'a InvitationId, msisdn: &'a str) -> Self {
        Self {
            invitation_id: id,
            msisdn,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBody<'a> {
    pub invitation_id: &'a InvitationId,
}

impl<'a> DeleteBody<'a> {
    pub fn new(id: &'a InvitationId) -> Self {
        Self { invitation_id: id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_flag_spellings() {
        let ok = |v: serde_json::Value| serde_json::from_value::<ResultFlag>(v).unwrap().is_success();
        assert!(ok(json!(true)));
        assert!(ok(json!("SUCCESS")));
        assert!(ok(json!("ok")));
        assert!(ok(json!(200)));
        assert!(ok(json!(1)));
        assert!(!ok(json!(false)));
        assert!(!ok(json!("fail")));
        assert!(!ok(json!(0)));
        assert!(!ok(json!(500)));
    }

    #[test]
    fn test_login_accepts_string_or_object() {
        let bare: Envelope<LoginData> =
            serde_json::from_value(json!({"result": true, "message": "", "data": "jwt-1"})).unwrap();
        assert_eq!(bare.into_data().unwrap().into_token().unwrap().expose(), "jwt-1");

        let object: Envelope<LoginData> =
            serde_json::from_value(json!({"result": true, "data": {"accessToken": "jwt-2"}}))
                .unwrap();
        assert_eq!(object.into_data().unwrap().into_token().unwrap().expose(), "jwt-2");
    }

    #[test]
    fn test_rejected_envelope_carries_message() {
        let env: Envelope<LoginData> =
            serde_json::from_value(json!({"result": false, "message": "Хэрэглэгч олдсонгүй"}))
                .unwrap();
        assert_eq!(
            env.into_data().unwrap_err(),
            ApiError::Rejected("Хэрэглэгч олдсонгүй".into())
        );
    }

    #[test]
    fn test_missing_data_is_decode_error() {
        let env: Envelope<LoginData> = serde_json::from_value(json!({"result": true})).unwrap();
        assert!(matches!(env.into_data(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_ack_drops_blank_message() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_value(json!({"result": "success", "message": "  "})).unwrap();
        assert_eq!(env.into_ack().unwrap(), Ack { message: None });
    }

    #[test]
    fn test_info_decodes_into_snapshot() {
        let env: Envelope<InfoData> = serde_json::from_value(json!({
            "result": true,
            "message": "ok",
            "data": {
                "referrals": [
                    {
                        "id": 12,
                        "invitedNumber": "99112233",
                        "newNumber": null,
                        "status": "SENT",
                        "operatorName": "Toki",
                        "expireDate": "2026-03-01T12:00:00+08:00"
                    },
                    {
                        "id": "ab-3",
                        "invitedNumber": "88001122",
                        "newNumber": "",
                        "status": "success",
                        "expireDate": 1772366400000i64
                    }
                ],
                "hasActiveEntitlement": true,
                "successReferralsCount": 1,
                "entitlementExpirationDate": "2026-03-10 00:00:00"
            }
        }))
        .unwrap();

        let snapshot = ReferralSnapshot::try_from(env.into_data().unwrap()).unwrap();
        assert_eq!(snapshot.invitations.len(), 2);

        let first = &snapshot.invitations[0];
        assert_eq!(first.id, InvitationId::new("12"));
        assert_eq!(first.status, InvitationStatus::Sent);
        assert_eq!(first.expire_date, Utc.with_ymd_and_hms(2026, 3, 1, 4, 0, 0).unwrap());

        let second = &snapshot.invitations[1];
        assert_eq!(second.new_number, None);
        assert_eq!(second.operator_name, "");
        assert_eq!(second.expire_date, Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());

        assert!(snapshot.entitlement.active);
        assert_eq!(snapshot.entitlement.success_count, 1);
        assert_eq!(
            snapshot.entitlement.expiration_date,
            Some(Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_empty_info_defaults() {
        let data: InfoData = serde_json::from_value(json!({})).unwrap();
        let snapshot = ReferralSnapshot::try_from(data).unwrap();
        assert!(snapshot.invitations.is_empty());
        assert!(!snapshot.entitlement.active);
        assert_eq!(snapshot.entitlement.expiration_date, None);
    }

    #[test]
    fn test_unknown_status_is_decode_error() {
        let dto: ReferralDto = serde_json::from_value(json!({
            "id": 1, "invitedNumber": "1", "status": "LOST", "expireDate": 0
        }))
        .unwrap();
        assert!(matches!(InvitationRecord::try_from(dto), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        for text in [
            "2026-01-02T03:04:05Z",
            "2026-01-02 03:04:05",
            "2026-01-02T03:04:05",
            "2026-01-02 03:04:05.000",
        ] {
            assert_eq!(WireTimestamp::Text(text.into()).to_utc().unwrap(), expected, "{text}");
        }
        assert!(WireTimestamp::Text("tomorrow".into()).to_utc().is_err());
    }

    #[test]
    fn test_zero_padded_string_id_is_not_renumbered() {
        let dto: ReferralDto = serde_json::from_value(json!({
            "id": "007",
            "invitedNumber": "88001122",
            "status": "EXPIRED",
            "expireDate": 1772366400000i64
        }))
        .unwrap();
        let record = InvitationRecord::try_from(dto).unwrap();

        assert_eq!(
            serde_json::to_value(ResendBody::new(&record.id, "88001122")).unwrap(),
            json!({"invitationId": "007", "msisdn": "88001122"})
        );
        assert_eq!(
            serde_json::to_value(DeleteBody::new(&record.id)).unwrap(),
            json!({"invitationId": "007"})
        );
    }

    #[test]
    fn test_bodies_serialize_camel_case() {
        let id = InvitationId::from_number(42);
        assert_eq!(
            serde_json::to_value(ResendBody::new(&id, "99112233")).unwrap(),
            json!({"invitationId": 42, "msisdn": "99112233"})
        );
        assert_eq!(
            serde_json::to_value(DeleteBody::new(&InvitationId::new("x-1"))).unwrap(),
            json!({"invitationId": "x-1"})
        );
        assert_eq!(
            serde_json::to_value(LoginBody { msisdn: "1", toki_id: "t" }).unwrap(),
            json!({"msisdn": "1", "tokiId": "t"})
        );
    }
}
