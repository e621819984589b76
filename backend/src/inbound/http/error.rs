//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning every
//! failure into the same JSON envelope:
//! `{error, detail, error_code, timestamp}` plus optional `field`, `details`
//! and `trace_id`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

const REDACTED_DETAIL: &str = "An unexpected error occurred";

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Short title for the error category.
    #[schema(example = "Validation error")]
    pub error: String,
    /// Human-readable explanation.
    #[schema(example = "name must include at least a first name and a surname")]
    pub detail: String,
    /// Stable machine-readable reason code.
    #[schema(example = "INSUFFICIENT_NAME_PARTS")]
    pub error_code: String,
    /// RFC 3339 time the response was produced.
    #[schema(example = "2026-10-16T09:30:00.000000Z")]
    pub timestamp: String,
    /// Input field the failure is attributed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "name")]
    pub field: Option<String>,
    /// Structured context such as violated bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Correlation identifier of the failing request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub trace_id: Option<String>,
}

impl ErrorResponse {
    /// Render `error` as observed at `at`, hiding internal detail.
    pub fn from_error(error: &Error, at: DateTime<Utc>) -> Self {
        let internal = matches!(error.code(), ErrorCode::InternalError);
        Self {
            error: error.code().title().to_owned(),
            detail: if internal {
                REDACTED_DETAIL.to_owned()
            } else {
                error.message().to_owned()
            },
            error_code: error.reason().to_owned(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, true),
            field: error.field().map(str::to_owned),
            details: if internal {
                None
            } else {
                error.details().cloned()
            },
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(
                reason = self.reason(),
                trace_id = self.trace_id().unwrap_or_default(),
                message = self.message(),
                "request failed with internal error"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorResponse::from_error(self, Utc::now()))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests;
