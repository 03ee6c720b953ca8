use std::fmt;

/// Failures surfaced by the API client.
///
/// Non-2xx statuses keep their raw code because the UI reports it verbatim
/// ("Erro 401"). `Transport` covers host-level failures where no response
/// ever arrived, so there is no status to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    Http { status: u16, body: String },

    /// The response body did not match the expected shape.
    Deserialization(String),

    /// The request payload could not be encoded.
    Serialization(String),

    /// The host failed to execute the request at all.
    Transport(String),
}

impl ApiError {
    /// The HTTP status to surface to the user, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Deserialization(msg) => write!(f, "unreadable response: {msg}"),
            ApiError::Serialization(msg) => write!(f, "unencodable payload: {msg}"),
            ApiError::Transport(msg) => write!(f, "request failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
