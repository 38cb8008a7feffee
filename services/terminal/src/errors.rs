use shared::errors::ServiceError;

/// Failures talking to the betting API
///
/// No request is retried; the caller decides what to show and keeps the
/// session intact.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session expired")]
    SessionExpired,

    #[error("Throw closed: {0}")]
    ThrowClosed(String),

    #[error("Rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Whether the session must be handed back to the auth flow
    pub fn is_fatal(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::SessionExpired => ServiceError::session_expired(),
            ApiError::ThrowClosed(message) => ServiceError::throw_closed(message),
            ApiError::Rejected { status, message } => ServiceError::rejected(status, message),
            ApiError::Transport(e) => ServiceError::backend_unavailable(e),
            ApiError::InvalidResponse(e) => ServiceError::deserialization_error(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
