//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::TraceId;

/// Stable machine-readable error category.
///
/// The category decides how adapters classify a failure; the finer-grained
/// reason code (for example `AGE_TOO_LOW`) travels alongside it in
/// [`Error::reason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The submitted data breaks a business rule or cannot be decoded.
    ValidationFailed,
    /// The request collides with existing state (e.g. a duplicate email).
    Conflict,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

impl ErrorCode {
    /// Short human-readable title for the category.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation error",
            Self::Conflict => "Conflict",
            Self::NotFound => "Not found",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Reason code reported for unclassified failures.
pub const INTERNAL_ERROR_REASON: &str = "INTERNAL_ERROR";
/// Reason code reported when a request body cannot be decoded.
pub const VALIDATION_ERROR_REASON: &str = "VALIDATION_ERROR";
/// Reason code reported when an email is already registered.
pub const DUPLICATE_EMAIL_REASON: &str = "DUPLICATE_EMAIL";
/// Reason code reported when a user id is unknown.
pub const USER_NOT_FOUND_REASON: &str = "USER_NOT_FOUND";

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `reason` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use user_registry::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("USER_NOT_FOUND", "user not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.reason(), "USER_NOT_FOUND");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Error {
    code: ErrorCode,
    reason: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The human-readable message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The reason code was blank.
    #[error("error reason must not be empty")]
    EmptyReason,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(code: ErrorCode, reason: impl Into<String>, message: impl Into<String>) -> Self {
        match Self::try_new(code, reason, message) {
            Ok(value) => value,
            Err(err) => panic!("error values must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the reason and message content.
    pub fn try_new(
        code: ErrorCode,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let reason = reason.into();
        let message = message.into();
        if reason.trim().is_empty() {
            return Err(ErrorValidationError::EmptyReason);
        }
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            reason,
            message,
            field: None,
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Stable machine-readable error category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Stable machine-readable reason code, e.g. `DUPLICATE_EMAIL`.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Input field the failure is attributed to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Supplementary error details for adapters.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Trace identifier captured when the error was created.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attribute the error to an input field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::validation("AGE_TOO_LOW", "too young")
    ///     .with_details(json!({ "min": 13 }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`].
    pub fn validation(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, reason, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, reason, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, reason, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, INTERNAL_ERROR_REASON, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.reason, self.message)
    }
}

impl std::error::Error for Error {}
