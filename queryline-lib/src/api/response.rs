//! Response payload interpretation.

use serde_json::Value;

use crate::error::ApiError;

/// Sentinel the service reports while it is down for maintenance.
const SERVICE_UNAVAILABLE: &str = "service_unavailable";

/// Interprets a parsed response payload for the named service.
///
/// A payload is exactly one of three shapes: a recognized error report
/// (`error`), a coded error report (`errorCode` + optional
/// `errorMessage`), or a success object carrying the `<service>_list`
/// array. Error fields win over the list; a payload with neither is a
/// contract mismatch. Records come back untyped, in source order.
pub(crate) fn interpret(mut payload: Value, service: &str) -> Result<Vec<Value>, ApiError> {
    if let Some(error) = payload.get("error").and_then(Value::as_str) {
        if error == SERVICE_UNAVAILABLE {
            return Err(ApiError::ServiceUnavailable);
        }
        return Err(ApiError::Server(error.to_string()));
    }

    if let Some(code) = payload.get("errorCode").and_then(Value::as_str) {
        let message = payload
            .get("errorMessage")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Err(ApiError::Server(format!("{code}: {message}")));
    }

    let field = format!("{service}_list");
    match payload.get_mut(&field).map(Value::take) {
        Some(Value::Array(records)) => Ok(records),
        _ => Err(ApiError::MissingResultList {
            service: service.to_string(),
            field,
        }),
    }
}
