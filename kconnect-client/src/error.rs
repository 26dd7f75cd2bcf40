//! Error types for the kconnect client

use kconnect_core::ErrorBody;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the kconnect client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed a round trip (DNS, refused, timeout, broken body)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The worker answered with a status of 400 or above
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The worker answered successfully but the body did not match the expected type
    #[error("Failed to parse response (status {status}): {message}")]
    Decode {
        /// HTTP status code
        status: u16,
        /// Decoder error
        message: String,
        /// Raw response body
        body: String,
    },

    /// The request body could not be encoded as JSON
    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-level failure reported by the worker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API error (status {status}): {body}")]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// `error_code` from the error envelope, if the body carried one
    pub error_code: Option<u16>,
    /// Envelope message, or the raw body when there is no envelope
    pub message: String,
    /// Raw response body
    pub body: String,
}

impl ApiError {
    /// Build an API error from a response status and its raw body
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(envelope) => Self {
                status,
                error_code: Some(envelope.error_code),
                message: envelope.message,
                body,
            },
            Err(_) => Self {
                status,
                error_code: None,
                message: body.clone(),
                body,
            },
        }
    }
}

impl ClientError {
    /// HTTP status observed before the failure, if the round trip completed
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            Self::Decode { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body, if the round trip completed
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api(err) => Some(&err.body),
            Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(ApiError { status: 404, .. }))
    }

    /// Check if the worker rejected the call because a rebalance is in progress
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Api(ApiError { status: 409, .. }))
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api(ApiError { status, .. }) if (400..500).contains(status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api(ApiError { status, .. }) if *status >= 500)
    }

    /// Check if the request failed before a response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_parses_envelope() {
        let err = ApiError::from_response(
            404,
            r#"{"error_code":404,"message":"Connector foo not found"}"#,
        );
        assert_eq!(err.error_code, Some(404));
        assert_eq!(err.message, "Connector foo not found");
        assert!(err.body.contains("error_code"));
    }

    #[test]
    fn test_api_error_keeps_plain_body() {
        let err = ApiError::from_response(502, "Bad Gateway");
        assert_eq!(err.error_code, None);
        assert_eq!(err.message, "Bad Gateway");
        assert_eq!(err.to_string(), "API error (status 502): Bad Gateway");
    }

    #[test]
    fn test_error_classification() {
        let conflict = ClientError::from(ApiError::from_response(409, "rebalance"));
        assert!(conflict.is_conflict());
        assert!(conflict.is_client_error());
        assert!(!conflict.is_server_error());
        assert_eq!(conflict.status(), Some(409));
        assert_eq!(conflict.body(), Some("rebalance"));

        let missing = ClientError::from(ApiError::from_response(404, ""));
        assert!(missing.is_not_found());

        let server = ClientError::from(ApiError::from_response(500, "boom"));
        assert!(server.is_server_error());
        assert!(server.to_string().contains("boom"));
    }

    #[test]
    fn test_decode_error_reports_status() {
        let err = ClientError::Decode {
            status: 200,
            message: "expected value".to_string(),
            body: "not json".to_string(),
        };
        assert_eq!(err.status(), Some(200));
        assert_eq!(err.body(), Some("not json"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_invalid_config_has_no_status() {
        let err = ClientError::InvalidConfig("bad".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Invalid configuration: bad");
    }
}
