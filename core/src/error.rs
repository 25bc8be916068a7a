//! Error types for the NanManager API client.
//!
//! # Design
//! Every call resolves to a value or exactly one `ClientError`. `Transport`
//! means no response was received at all. `Api` means the server produced a
//! structured failure, either on an error status or as a nonzero envelope
//! code riding on a 2xx. `Http` covers error statuses with no readable error
//! body, and `Decode` a body that did not have the expected shape.

use thiserror::Error;

/// Errors returned by `NanManagerClient` calls and `envelope::decode`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, timeout, IO).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server reported a business-level failure.
    ///
    /// `code` is the envelope's application code. It is `None` for the
    /// legacy `{"detail": ...}` error shape, which carries no code.
    #[error("API error{}: {message}{}", code_suffix(.code), request_id_suffix(.request_id))]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
        request_id: Option<String>,
    },

    /// Error status without a structured error body.
    ///
    /// `body` is the response body decoded as UTF-8, with invalid sequences
    /// replaced by U+FFFD.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body did not match the expected shape. `body` is
    /// converted the same lossy way as for `Http`.
    #[error("failed to decode response: {reason}")]
    Decode { body: String, reason: String },

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request: {0}")]
    Serialization(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn code_suffix(code: &Option<i64>) -> String {
    match code {
        Some(code) => format!(" {code}"),
        None => String::new(),
    }
}

fn request_id_suffix(request_id: &Option<String>) -> String {
    match request_id {
        Some(id) => format!(" (request id: {id})"),
        None => String::new(),
    }
}

impl ClientError {
    /// HTTP status of the response that caused the error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn request_id(&self) -> Option<&str> {
        match self {
            ClientError::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_request_id() {
        let err = ClientError::Api {
            status: 404,
            code: Some(5),
            message: "not found".to_string(),
            request_id: Some("r1".to_string()),
        };
        assert_eq!(err.to_string(), "API error 5: not found (request id: r1)");
        assert!(err.is_not_found());
        assert_eq!(err.request_id(), Some("r1"));
    }

    #[test]
    fn api_error_display_without_request_id() {
        let err = ClientError::Api {
            status: 200,
            code: Some(1001),
            message: "player already exists".to_string(),
            request_id: None,
        };
        assert_eq!(err.to_string(), "API error 1001: player already exists");
        assert!(!err.is_not_found());
    }

    #[test]
    fn legacy_api_error_display_has_no_code() {
        let err = ClientError::Api {
            status: 401,
            code: None,
            message: "unauthorized".to_string(),
            request_id: None,
        };
        assert_eq!(err.to_string(), "API error: unauthorized");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ClientError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "transport error: connection refused");
    }

    #[test]
    fn config_error_is_transparent() {
        let err: ClientError = ConfigError::Missing("token").into();
        assert_eq!(err.to_string(), "missing required setting: token");
    }
}
