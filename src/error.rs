// Error type shared by every client operation.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, UtApiError>;

/// Errors returned by [`crate::UtApi`] operations.
#[derive(Error, Debug)]
pub enum UtApiError {
    /// No secret attached to the client
    #[error("there is no secret attached to the client")]
    Auth,

    /// The API or the storage backend answered with something other than 200
    #[error("request failed with status {status}")]
    Http { status: u16 },

    /// Response body was not the JSON we expected
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local file could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection, TLS or request-building failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A file in the batch reports a content type that is not a MIME type
    #[error("invalid content type {content_type:?} for {file_name}")]
    InvalidContentType {
        file_name: String,
        content_type: String,
    },

    /// Upload target returned by the API is not a usable URL
    #[error("invalid upload url: {0}")]
    InvalidUrl(String),
}

impl UtApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a missing-secret error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_carries_only_status() {
        let error = UtApiError::Http { status: 403 };
        assert_eq!(error.status(), Some(403));
        assert_eq!(error.to_string(), "request failed with status 403");
        assert!(!error.is_auth());
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: UtApiError = err.into();
        assert!(matches!(error, UtApiError::Decode(_)));
        assert_eq!(error.status(), None);
    }
}
