use pollemic_domain::ID;
use pollemic_sdk::{APIError, APIErrorVariant};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PollemicError {
    /// Carries the message explaining why the draft cannot be submitted
    #[error("{0}")]
    InvalidDraft(String),
    #[error("The requested edit does not apply to the draft: {0}")]
    InvalidEdit(String),
    /// User facing message of a rejected backend request
    #[error("{0}")]
    Backend(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("Could not reach the Pollemic backend")]
    Unreachable,
    /// Some target groups received the questionnaire before another one failed
    #[error("{message}")]
    PartiallyAssigned {
        assigned: Vec<ID>,
        failed: Vec<ID>,
        message: String,
    },
}

impl PollemicError {
    /// Maps an SDK error, preferring the backend's own message over `fallback`
    pub fn from_api(e: APIError, fallback: &str) -> Self {
        match e.variant {
            APIErrorVariant::Network => Self::Unreachable,
            APIErrorVariant::Unauthenticated | APIErrorVariant::Unauthorized => {
                Self::Unauthorized(e.user_message_or(fallback))
            }
            _ => Self::Backend(e.user_message_or(fallback)),
        }
    }
}
