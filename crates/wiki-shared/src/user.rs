//! Shared items describing the account the current session belongs to

mod userinfo;

use std::{collections::BTreeSet, fmt::Display};

use crate::errors::ConflictingAccountKind;

pub use userinfo::decode_current_user;

/// Account identifier assigned by the wiki
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct UserId(u64);

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<UserId> for u64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What sort of account the session belongs to. An account is never both an
/// IP account and a temporary account.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    #[default]
    Registered,
    /// Not logged in, the wiki identifies the user by IP address
    Ip,
    /// Short-lived account created automatically by the wiki
    Temporary,
}

impl AccountKind {
    pub fn from_flags(is_ip: bool, is_temp: bool) -> Result<Self, ConflictingAccountKind> {
        match (is_ip, is_temp) {
            (true, true) => Err(ConflictingAccountKind),
            (true, false) => Ok(Self::Ip),
            (false, true) => Ok(Self::Temporary),
            (false, false) => Ok(Self::Registered),
        }
    }
}

/// How a response describing an anonymous (IP) user is treated
#[derive(
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AnonymousPolicy {
    /// IP and temporary accounts are valid results and are reported through
    /// [`CurrentUser::kind`]
    #[default]
    Permissive,
    /// An IP account is a failure ([`CurrentUserError::UserIsAnonymous`]) and
    /// temporary accounts are not distinguished from registered ones
    ///
    /// [`CurrentUserError::UserIsAnonymous`]: crate::errors::CurrentUserError::UserIsAnonymous
    Strict,
}

/// Stores what the wiki reported about the user of the current session
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub name: String,
    pub kind: AccountKind,
    pub groups: BTreeSet<String>,
    pub edit_count: u64,
    /// Only set for a sitewide block, partial blocks do not count
    pub is_blocked: bool,
    /// Passed through exactly as the wiki formats it
    pub registration_date: Option<String>,
}

impl CurrentUser {
    #[must_use]
    pub fn is_ip(&self) -> bool {
        self.kind == AccountKind::Ip
    }

    #[must_use]
    pub fn is_temp(&self) -> bool {
        self.kind == AccountKind::Temporary
    }

    #[must_use]
    pub fn is_in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}
