//! Error types for backend requests

use thiserror::Error;

/// Fallback shown when the backend gives no usable message.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Errors from talking to the SANAD backend.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure: connectivity, TLS, or the client-side timeout
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx response whose body did not parse as the expected envelope
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend reported failure, via `success: false` or a non-2xx status
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A successful envelope arrived without the expected `data` payload
    #[error("Response is missing its data payload")]
    MissingData,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this was the client-side timeout firing
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Message suitable for a user-facing alert: the backend's `message`
    /// when present, a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_message() {
        let err = Error::Api {
            status: 409,
            message: "Device already assigned".to_string(),
        };
        assert_eq!(err.user_message(), "Device already assigned");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = Error::MissingData;
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = Error::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }
}
