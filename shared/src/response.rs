//! API response envelope
//!
//! Some backend endpoints wrap their payload:
//!
//! ```json
//! { "success": true, "message": "OK", "data": { ... } }
//! ```
//!
//! others return the bare payload. [`unwrap_payload`] is the single place
//! that normalizes both shapes, so every HTTP client implementation hands
//! typed payloads to its callers.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Envelope unwrapping failure
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The backend answered `success: false`
    #[error("{}", .message.as_deref().unwrap_or("Request was rejected by the server"))]
    Rejected { message: Option<String> },

    /// Payload did not match the expected type
    #[error("Unexpected payload shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Unwrap an optionally enveloped body into `T`
///
/// - an object with a boolean `success` key is treated as an envelope;
///   `success: false` yields [`EnvelopeError::Rejected`]
/// - a non-null `data` member is decoded as `T`
/// - otherwise the whole body is decoded as `T`
pub fn unwrap_payload<T: DeserializeOwned>(body: Value) -> Result<T, EnvelopeError> {
    let Value::Object(mut map) = body else {
        return Ok(serde_json::from_value(body)?);
    };

    let Some(success) = map.get("success").and_then(Value::as_bool) else {
        return Ok(serde_json::from_value(Value::Object(map))?);
    };

    if !success {
        let message = map
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        return Err(EnvelopeError::Rejected { message });
    }

    match map.remove("data") {
        Some(data) if !data.is_null() => Ok(serde_json::from_value(data)?),
        Some(_) | None => {
            // `data` absent or null: fall back to the whole body, which also
            // lets `()` and `Option<_>` payloads decode from a bare envelope
            match serde_json::from_value::<T>(Value::Null) {
                Ok(unit) => Ok(unit),
                Err(_) => Ok(serde_json::from_value(Value::Object(map))?),
            }
        }
    }
}
