//! Response envelope decoding.
//!
//! Every endpoint wraps its payload as
//! `{"code": 0, "message": "...", "data": ..., "request_id": "..."}`.
//! Older server builds report failures as a bare `{"detail": "..."}` instead,
//! so error statuses are checked against both shapes in that order.
//!
//! Decoding is a pure function of status and body: the same response always
//! yields the same result.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::HttpResponse;

/// The standard response wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Legacy error body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Decode a response that must carry a `data` payload of type `T`.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ClientError> {
    check_status(response)?;

    let envelope: Envelope = serde_json::from_slice(&response.body)
        .map_err(|e| decode_error(response, e.to_string()))?;

    if envelope.code != 0 {
        return Err(ClientError::Api {
            status: response.status,
            code: Some(envelope.code),
            message: envelope.message.unwrap_or_default(),
            request_id: non_empty(envelope.request_id),
        });
    }

    match envelope.data {
        None | Some(Value::Null) => Err(decode_error(response, "envelope has no data".to_string())),
        Some(data) => {
            serde_json::from_value(data).map_err(|e| decode_error(response, e.to_string()))
        }
    }
}

/// Decode a response for a call that expects no payload.
///
/// Success statuses are accepted without looking at the body.
pub fn decode_empty(response: &HttpResponse) -> Result<(), ClientError> {
    check_status(response)
}

/// Map error statuses to `Api` or `Http` errors.
fn check_status(response: &HttpResponse) -> Result<(), ClientError> {
    if response.status < 400 {
        return Ok(());
    }

    if let Ok(envelope) = serde_json::from_slice::<Envelope>(&response.body) {
        if let Some(message) = non_empty(envelope.message) {
            return Err(ClientError::Api {
                status: response.status,
                code: Some(envelope.code),
                message,
                request_id: non_empty(envelope.request_id),
            });
        }
    }

    if let Ok(error) = serde_json::from_slice::<ErrorDetail>(&response.body) {
        if let Some(detail) = non_empty(error.detail) {
            return Err(ClientError::Api {
                status: response.status,
                code: None,
                message: detail,
                request_id: None,
            });
        }
    }

    Err(ClientError::Http {
        status: response.status,
        body: response.body_text(),
    })
}

fn decode_error(response: &HttpResponse, reason: String) -> ClientError {
    ClientError::Decode {
        body: response.body_text(),
        reason,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
