//! Domain primitives, validation rules and services.
//!
//! Purpose: decide which registrations are accepted and describe how accepted
//! users are stored, without depending on HTTP or storage details.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - UserRecord and its value types (UserId, FullName, EmailAddress, Age).
//! - registration: the validator, its policy and rejection reasons.
//! - RegistrationService: implements the driving ports over a registry.
//! - TraceId: per-request correlation identifier.

pub mod error;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::registration::{
    NormalizedRegistration, RegistrationField, RegistrationRejection, RegistrationRequest,
    ValidationPolicy,
};
pub use self::registration_service::RegistrationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Age, EmailAddress, FullName, NewUser, UserId, UserIdError, UserRecord};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use user_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("USER_NOT_FOUND", "user not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
