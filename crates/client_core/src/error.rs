use reqwest::StatusCode;
use shared::error::ErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing credential or a 401 from the server. Callers route to login.
    #[error("unauthorized")]
    Unauthorized,
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: ErrorBody },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response did not match the expected contract: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ClientError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Outcome of a user action as the screens consume it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("session expired, login required")]
    Unauthorized,
    /// Translated, user-facing message.
    #[error("{0}")]
    Rejected(String),
}

impl ActionError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ActionError::Unauthorized)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ActionError::Rejected(message) => Some(message),
            ActionError::Unauthorized => None,
        }
    }
}

pub type ActionResult<T> = Result<T, ActionError>;
