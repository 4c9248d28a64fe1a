use thiserror::Error;

/// Everything that can go wrong while finding out who the current user is
#[derive(Debug, Error)]
pub enum CurrentUserError {
    #[error("Could not extract user info")]
    CannotExtractUserInfo,
    #[error("User is anonymous")]
    UserIsAnonymous,
    /// Only produced while validating login arguments, a fetch never returns it
    #[error("Blank username or password")]
    BlankUsernameOrPassword,
    #[error("failed to send request")]
    Transport(#[from] reqwest::Error),
    #[error("request failed with status code: {status} and body: {body:?}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("wiki API returned error '{code}': {info}")]
    Api { code: String, info: String },
}

impl CurrentUserError {
    /// Returns `true` if the error is [`CannotExtractUserInfo`].
    ///
    /// [`CannotExtractUserInfo`]: CurrentUserError::CannotExtractUserInfo
    #[must_use]
    pub fn is_cannot_extract_user_info(&self) -> bool {
        matches!(self, Self::CannotExtractUserInfo)
    }

    /// Returns `true` if the error is [`UserIsAnonymous`].
    ///
    /// [`UserIsAnonymous`]: CurrentUserError::UserIsAnonymous
    #[must_use]
    pub fn is_user_is_anonymous(&self) -> bool {
        matches!(self, Self::UserIsAnonymous)
    }

    /// Returns `true` if the error came from the transport and not the wiki
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid values. A user cannot both be IP and Temp.")]
pub struct ConflictingAccountKind;
