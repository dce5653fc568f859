//! Error taxonomy for the TDnet client.

use thiserror::Error;

/// Failures surfaced to callers of [`crate::TdnetClient`].
#[derive(Debug, Error)]
pub enum TdnetError {
    /// A caller-supplied value failed a precondition; no request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The exchange completed with a failure, or the body could not be used.
    #[error("request to {url} failed: {reason}")]
    Request {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// The final attempt timed out.
    #[error("request to {url} timed out after {attempts} attempt(s)")]
    Timeout { url: String, attempts: u32 },
}

impl TdnetError {
    /// Usage errors, as opposed to transient or upstream failures
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// HTTP status of the failed exchange, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TdnetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_is_distinguishable() {
        let err = TdnetError::InvalidArgument("bad code".to_string());
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "invalid argument: bad code");

        let err = TdnetError::Timeout {
            url: "https://example.com/recent.json".to_string(),
            attempts: 3,
        };
        assert!(!err.is_invalid_argument());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_request_error_carries_status() {
        let err = TdnetError::Request {
            url: "https://example.com/recent.json".to_string(),
            status: Some(404),
            reason: "HTTP 404 Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("HTTP 404"));
    }
}
