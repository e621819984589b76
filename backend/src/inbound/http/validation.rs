//! Request-body decoding failures.
//!
//! Bodies that are not JSON, miss a field or carry a value of the wrong type
//! never reach the validator. They are answered with 422 `VALIDATION_ERROR`
//! in the same envelope as rule failures.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;
use crate::domain::error::VALIDATION_ERROR_REASON;

/// Map a JSON extraction failure to a domain validation error.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "request body rejected");
    let error = match &err {
        JsonPayloadError::ContentType => Error::validation(
            VALIDATION_ERROR_REASON,
            "request body must be sent as application/json",
        ),
        JsonPayloadError::Deserialize(source) => Error::validation(
            VALIDATION_ERROR_REASON,
            "request body does not match the expected shape",
        )
        .with_details(json!({
            "message": source.to_string(),
            "line": source.line(),
            "column": source.column(),
        })),
        other => Error::validation(
            VALIDATION_ERROR_REASON,
            format!("request body could not be read: {other}"),
        ),
    };
    error.into()
}

/// JSON extractor configuration shared by every route.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
