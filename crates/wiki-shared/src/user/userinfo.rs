//! Decoding of the `meta=userinfo` response
//!
//! `id` and `name` are required and must have the right type. Every other
//! field falls back to its default when it is missing or of the wrong type.

use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use super::{AccountKind, AnonymousPolicy, CurrentUser};
use crate::errors::CurrentUserError;

#[derive(Deserialize)]
struct UserInfoResponse {
    #[serde(default)]
    error: Option<ApiErrorBody>,
    #[serde(default)]
    query: Option<UserInfoQuery>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Deserialize)]
struct UserInfoQuery {
    userinfo: UserInfoPayload,
}

#[derive(Deserialize)]
struct UserInfoPayload {
    id: u64,
    name: String,
    #[serde(default, deserialize_with = "lenient::present")]
    anon: bool,
    #[serde(default, deserialize_with = "lenient::present")]
    temp: bool,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    editcount: u64,
    #[serde(default, deserialize_with = "lenient::string")]
    registrationdate: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    blockid: Option<u64>,
    #[serde(default, deserialize_with = "lenient::bool_or_false")]
    blockpartial: bool,
    #[serde(default, deserialize_with = "lenient::string_list")]
    groups: Vec<String>,
}

/// Decodes the body of a `meta=userinfo` response into a [`CurrentUser`]
/// applying `policy` to anonymous accounts
#[tracing::instrument(skip(body), fields(body_len = body.len()), err(Debug))]
pub fn decode_current_user(
    body: &[u8],
    policy: AnonymousPolicy,
) -> Result<CurrentUser, CurrentUserError> {
    let response: UserInfoResponse = serde_json::from_slice(body).map_err(|err| {
        debug!(?err, "failed to decode userinfo response");
        CurrentUserError::CannotExtractUserInfo
    })?;
    if let Some(ApiErrorBody { code, info }) = response.error {
        return Err(CurrentUserError::Api { code, info });
    }
    let Some(query) = response.query else {
        debug!("userinfo response has no query");
        return Err(CurrentUserError::CannotExtractUserInfo);
    };
    query.userinfo.into_current_user(policy)
}

impl UserInfoPayload {
    fn into_current_user(self, policy: AnonymousPolicy) -> Result<CurrentUser, CurrentUserError> {
        let kind = match policy {
            AnonymousPolicy::Permissive => {
                AccountKind::from_flags(self.anon, self.temp).map_err(|err| {
                    warn!(%err, user_id = self.id, "userinfo marks the user as both IP and temp");
                    CurrentUserError::CannotExtractUserInfo
                })?
            }
            AnonymousPolicy::Strict => {
                if self.anon {
                    return Err(CurrentUserError::UserIsAnonymous);
                }
                AccountKind::Registered
            }
        };
        Ok(CurrentUser {
            user_id: self.id.into(),
            name: self.name,
            kind,
            groups: self.groups.into_iter().collect(),
            edit_count: self.editcount,
            is_blocked: self.blockid.is_some() && !self.blockpartial,
            registration_date: self.registrationdate,
        })
    }
}

mod lenient {
    use super::*;
    use serde_json::Value;

    /// The key being there is all that matters, the value is ignored
    pub fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer).map(|_| true)
    }

    pub fn opt_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        Ok(Value::deserialize(deserializer)?.as_u64())
    }

    pub fn u64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        Ok(opt_u64(deserializer)?.unwrap_or_default())
    }

    pub fn bool_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(Value::deserialize(deserializer)?
            .as_bool()
            .unwrap_or_default())
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    /// Empty unless every element is a string
    pub fn string_list<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default())
    }
}
