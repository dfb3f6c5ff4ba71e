use reqwest::StatusCode;

/// Status reported for failures that never reached the backend.
pub const TRANSPORT_STATUS: u16 = 0;

/// Classified failure of a backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, TLS, ...).
    #[error("request failed: {message}")]
    Transport { message: String },
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The backend answered 2xx but the body did not match the expected shape.
    #[error("invalid response body (status {status}): {message}")]
    Decode { status: u16, message: String },
    /// No session token is stored; the call was not attempted.
    #[error("session expired; run `ihub login`")]
    SessionMissing,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Transport { .. } | ApiError::SessionMissing => TRANSPORT_STATUS,
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => *status,
        }
    }

    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED.as_u16()
                    || *status == StatusCode::FORBIDDEN.as_u16()
        )
    }

    /// Whether the caller should send the user back through login.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::SessionMissing) || self.is_auth_rejection()
    }

    pub(crate) fn status_failure(action: &str, status: StatusCode) -> Self {
        ApiError::Status {
            status: status.as_u16(),
            message: format!("{action} failed with status {}", status.as_u16()),
        }
    }

    /// A 2xx arrived but its body could not be read to the end.
    pub(crate) fn body_read_failure(status: StatusCode, err: reqwest::Error) -> Self {
        ApiError::Decode {
            status: status.as_u16(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport {
            message: err.to_string(),
        }
    }
}
