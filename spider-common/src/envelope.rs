//! Response envelope and the normalized failure record.
//!
//! Every successful backend response has the shape `{code, message, data}`.
//! Every failed call, whatever went wrong, is reported as an [`ApiError`]
//! with the shape `{code, message, status}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message used when a non-2xx body carries no usable `message`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Message used when the call failed before a response could be read
/// and the underlying error has no description.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Success wrapper returned by every backend endpoint.
///
/// `code` is the backend's domain status and is independent of the HTTP
/// status; a 2xx response is handed back as-is even when `code` is not 0.
///
/// Several endpoints omit `data` on success (cancel, delete, "nothing new
/// to download"). A missing `data` decodes exactly like `"data": null`, so
/// `Envelope<Value>` yields `Value::Null` and `Envelope<Option<_>>` yields
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawEnvelope",
    bound(deserialize = "T: DeserializeOwned")
)]
pub struct Envelope<T> {
    pub code: i64,
    pub message: String,
    pub data: T,
}

/// Wire form of [`Envelope`] before the payload is typed.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Value,
}

impl<T: DeserializeOwned> TryFrom<RawEnvelope> for Envelope<T> {
    type Error = serde_json::Error;

    fn try_from(raw: RawEnvelope) -> Result<Self, Self::Error> {
        Ok(Self {
            code: raw.code,
            message: raw.message,
            data: serde_json::from_value(raw.data)?,
        })
    }
}

/// Payload type for endpoints that answer without `data` (cancel, delete,
/// scanner start/stop, ...). Any payload the backend does send is kept.
pub type NoData = Option<Value>;

impl<T> Envelope<T> {
    pub fn new(code: i64, message: impl Into<String>, data: T) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    /// True when the backend reported domain code 0.
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            code: self.code,
            message: self.message,
            data: f(self.data),
        }
    }
}

/// Normalized failure record.
///
/// - `code`: the backend's domain code, or the HTTP status when the body has
///   none, or 0 when no response was obtained.
/// - `status`: always the HTTP status, 0 when no response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: i64,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>, status: u16) -> Self {
        Self {
            code,
            message: message.into(),
            status,
        }
    }

    /// Build the record for a non-2xx response whose body parsed as JSON.
    ///
    /// A missing, zero or non-integer `code` falls back to the HTTP status;
    /// a missing or empty `message` falls back to [`GENERIC_FAILURE_MESSAGE`].
    pub fn from_response(status: u16, body: &Value) -> Self {
        let code = body
            .get("code")
            .and_then(Value::as_i64)
            .filter(|code| *code != 0)
            .unwrap_or(i64::from(status));
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE);

        Self::new(code, message, status)
    }

    /// Build the record for a call that never produced a readable JSON body.
    pub fn network(description: impl Into<String>) -> Self {
        let description = description.into();
        let message = if description.trim().is_empty() {
            NETWORK_ERROR_MESSAGE.to_string()
        } else {
            description
        };

        Self::new(0, message, 0)
    }

    /// True when no HTTP response was obtained (connection, DNS, decode).
    pub fn is_network(&self) -> bool {
        self.status == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_uses_body_fields() {
        let err = ApiError::from_response(404, &json!({"code": 404, "message": "Task not found"}));
        assert_eq!(err, ApiError::new(404, "Task not found", 404));
    }

    #[test]
    fn test_from_response_keeps_domain_code_distinct_from_status() {
        let err = ApiError::from_response(400, &json!({"code": 40012, "message": "bad cookie"}));
        assert_eq!(err.code, 40012);
        assert_eq!(err.status, 400);
    }

    #[test]
    fn test_from_response_defaults() {
        let err = ApiError::from_response(502, &json!({"detail": "upstream"}));
        assert_eq!(err.code, 502);
        assert_eq!(err.message, GENERIC_FAILURE_MESSAGE);
        assert_eq!(err.status, 502);
    }

    #[test]
    fn test_from_response_treats_zero_and_empty_as_absent() {
        let err = ApiError::from_response(500, &json!({"code": 0, "message": ""}));
        assert_eq!(err.code, 500);
        assert_eq!(err.message, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_from_response_non_object_body() {
        let err = ApiError::from_response(503, &json!(["unavailable"]));
        assert_eq!(err, ApiError::new(503, GENERIC_FAILURE_MESSAGE, 503));
    }

    #[test]
    fn test_network_error() {
        let err = ApiError::network("connection refused");
        assert_eq!(err, ApiError::new(0, "connection refused", 0));
        assert!(err.is_network());

        let err = ApiError::network("");
        assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_display_is_message() {
        let err = ApiError::new(400, "Task already finished", 400);
        assert_eq!(err.to_string(), "Task already finished");
    }

    #[test]
    fn test_envelope_without_data_field() {
        let envelope: Envelope<NoData> =
            serde_json::from_str(r#"{"code": 0, "message": "success"}"#).unwrap();
        assert!(envelope.is_ok());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_raw_envelope_without_data_is_null() {
        let envelope: Envelope<Value> =
            serde_json::from_str(r#"{"code": 0, "message": "没有新视频需要下载"}"#).unwrap();
        assert_eq!(envelope.code, 0);
        assert_eq!(envelope.message, "没有新视频需要下载");
        assert_eq!(envelope.data, Value::Null);
    }

    #[test]
    fn test_envelope_missing_data_for_required_payload_fails() {
        let result: Result<Envelope<Vec<String>>, _> =
            serde_json::from_str(r#"{"code": 0, "message": "success"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_map() {
        let envelope = Envelope::new(0, "success", vec![1, 2, 3]).map(|v| v.len());
        assert_eq!(envelope.data, 3);
        assert_eq!(envelope.message, "success");
    }
}
