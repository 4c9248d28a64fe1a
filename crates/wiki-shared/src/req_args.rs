//! This module stores the expected format of the arguments for the requests
//! sent to the wiki API

use crate::{
    const_config::userinfo::{USERINFO_ACTION, USERINFO_FORMAT, USERINFO_META, USERINFO_PROPS},
    errors::CurrentUserError,
};
use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

/// Form parameters asking for the groups, block info, edit count and
/// registration date of the user the session belongs to
#[derive(Debug, serde::Serialize, Clone, PartialEq, Eq)]
pub struct UserInfoQueryArgs {
    pub action: &'static str,
    pub meta: &'static str,
    pub uiprop: &'static str,
    pub format: &'static str,
}

impl Default for UserInfoQueryArgs {
    fn default() -> Self {
        Self {
            action: USERINFO_ACTION,
            meta: USERINFO_META,
            uiprop: USERINFO_PROPS,
            format: USERINFO_FORMAT,
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(username: S, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Ensures neither the username nor the password is blank (whitespace
    /// only counts as blank)
    pub fn validate(&self) -> Result<(), CurrentUserError> {
        if self.username.trim().is_empty() || self.password.expose_secret().trim().is_empty() {
            Err(CurrentUserError::BlankUsernameOrPassword)
        } else {
            Ok(())
        }
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}
