//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn age_rejection() -> Error {
    Error::validation("AGE_TOO_LOW", "age must be at least 13")
        .with_field("age")
        .with_details(json!({"min": 13, "age": 12}))
        .with_trace_id(TRACE_ID)
}

#[fixture]
fn internal_failure() -> Error {
    Error::internal("registry lock poisoned")
        .with_details(json!({"secret": "x"}))
        .with_trace_id(TRACE_ID)
}

async fn read_response(error: &Error, expected_status: StatusCode) -> (Option<String>, ErrorResponse) {
    let response = ResponseError::error_response(error);
    assert_eq!(response.status(), expected_status);

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace-id is UTF-8").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error envelope deserialises");
    (header, body)
}

#[rstest]
#[case(Error::validation("EMPTY_NAME", "name must not be empty"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::conflict("DUPLICATE_EMAIL", "already registered"), StatusCode::CONFLICT)]
#[case(Error::not_found("USER_NOT_FOUND", "user not found"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn validation_error_keeps_field_and_details(age_rejection: Error) {
    let (header, body) = read_response(&age_rejection, StatusCode::UNPROCESSABLE_ENTITY).await;

    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.error, "Validation error");
    assert_eq!(body.detail, "age must be at least 13");
    assert_eq!(body.error_code, "AGE_TOO_LOW");
    assert_eq!(body.field.as_deref(), Some("age"));
    assert_eq!(body.details, Some(json!({"min": 13, "age": 12})));
    assert_eq!(body.trace_id.as_deref(), Some(TRACE_ID));
    assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
}

#[rstest]
#[actix_web::test]
async fn internal_error_is_redacted(internal_failure: Error) {
    let (header, body) = read_response(&internal_failure, StatusCode::INTERNAL_SERVER_ERROR).await;

    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.error, "Internal server error");
    assert_eq!(body.error_code, "INTERNAL_ERROR");
    assert_eq!(body.detail, "An unexpected error occurred");
    assert!(body.details.is_none());
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_header_and_key() {
    let error = Error::not_found("USER_NOT_FOUND", "user not found");
    let response = ResponseError::error_response(&error);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());

    let bytes = to_bytes(response.into_body()).await.expect("body");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    let object = value.as_object().expect("object body");
    assert!(!object.contains_key("trace_id"));
    assert!(!object.contains_key("field"));
    for key in ["error", "detail", "error_code", "timestamp"] {
        assert!(object.contains_key(key), "missing {key}");
    }
}

#[rstest]
fn envelope_timestamp_uses_rfc3339_utc() {
    let at = Utc
        .with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
        .single()
        .expect("valid timestamp");
    let envelope = ErrorResponse::from_error(&Error::conflict("DUPLICATE_EMAIL", "taken"), at);
    assert_eq!(envelope.timestamp, "2026-10-16T09:30:00.000000Z");
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
