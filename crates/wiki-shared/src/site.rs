use std::fmt::Display;

use crate::const_config::path::PathSpec;

/// Identifies the wiki to talk to by its base URL (for example
/// `https://en.wikipedia.org`). Not validated, a bad value surfaces as a
/// transport error when used.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SiteUrl(String);

impl SiteUrl {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self(base_url.into())
    }

    pub fn api_url(&self, path_spec: &PathSpec) -> String {
        format!("{}{}", self.0.trim_end_matches('/'), path_spec.path)
    }
}

impl From<String> for SiteUrl {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SiteUrl {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for SiteUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
