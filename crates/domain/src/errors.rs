//! Error types used throughout the application

use thiserror::Error;

/// Closed error taxonomy for every client operation.
///
/// Exactly one variant describes each failure. None of these are retried
/// internally; callers decide whether an operation is worth repeating.
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// The token endpoint rejected the credentials, or an authenticated
    /// operation was attempted before any successful authentication.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The server answered with a success status but the body could not be
    /// decoded into the expected shape.
    #[error("invalid response from server")]
    InvalidResponse,

    /// A completion wait exceeded its deadline.
    #[error("timed out waiting for processing to complete")]
    Timeout,

    /// The server returned a structured failure.
    #[error("API error: {0}")]
    Api(String),

    /// Transport-level failure (connect, DNS, TLS, timeout, body read).
    #[error("network error: {0}")]
    Network(String),
}

/// Result type alias for manifest client operations
pub type Result<T> = std::result::Result<T, ProcessingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_api_detail() {
        let err = ProcessingError::Api("document rejected".to_string());
        assert_eq!(err.to_string(), "API error: document rejected");
    }

    #[test]
    fn display_includes_network_cause() {
        let err = ProcessingError::Network("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn unit_variants_have_stable_messages() {
        assert_eq!(ProcessingError::AuthenticationFailed.to_string(), "authentication failed");
        assert_eq!(
            ProcessingError::InvalidResponse.to_string(),
            "invalid response from server"
        );
        assert_eq!(
            ProcessingError::Timeout.to_string(),
            "timed out waiting for processing to complete"
        );
    }
}
