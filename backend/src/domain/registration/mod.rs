//! Registration validator.
//!
//! Decides whether a [`RegistrationRequest`] may become a user record. Rules
//! run in a fixed order (name, then email, then age) and the first failure is
//! reported as a [`RegistrationRejection`] naming both the field and the
//! rule. Validation has no side effects.
//!
//! ```text
//! name:  INVALID_NAME_CHARS -> EMPTY_NAME -> INSUFFICIENT_NAME_PARTS -> NAME_LENGTH_OUT_OF_RANGE
//! email: INVALID_EMAIL_FORMAT -> DISPOSABLE_EMAIL_DOMAIN
//! age:   AGE_TOO_LOW -> AGE_TOO_HIGH
//! ```

mod policy;
mod rules;

pub use policy::{
    AGE_MAX, AGE_MIN, DEFAULT_BLOCKED_DOMAINS, NAME_LENGTH_MAX, NAME_LENGTH_MIN, PolicyError,
    ValidationPolicy,
};

use serde_json::{Value, json};

use crate::domain::user::{Age, EmailAddress, FullName, NewUser};

/// Raw registration submission. Carries no invariants until validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Full name as submitted.
    pub name: String,
    /// Email address as submitted.
    pub email: String,
    /// Age in years as submitted.
    pub age: i64,
}

/// Input field a rejection is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    /// The `name` field.
    Name,
    /// The `email` field.
    Email,
    /// The `age` field.
    Age,
}

impl RegistrationField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Age => "age",
        }
    }
}

/// Reason a registration was refused by the validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationRejection {
    /// The name contains digits, punctuation or symbols.
    #[error("name may only contain letters and spaces")]
    InvalidNameChars,
    /// The name is blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The name lacks a first name and a surname.
    #[error("name must include at least a first name and a surname")]
    InsufficientNameParts {
        /// Number of whitespace-separated parts found.
        found: usize,
    },
    /// The trimmed name is too short or too long.
    #[error("name must be between {min} and {max} characters")]
    NameLengthOutOfRange {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
        /// Length of the submitted name.
        length: usize,
    },
    /// The email address is not syntactically valid.
    #[error("email address is not valid")]
    InvalidEmailFormat,
    /// The email belongs to a disposable mailbox provider.
    #[error("disposable email domains are not allowed")]
    DisposableEmailDomain {
        /// Offending domain, lower-cased.
        domain: String,
    },
    /// The age is below the minimum.
    #[error("age must be at least {min}")]
    AgeTooLow {
        /// Minimum accepted age.
        min: u8,
        /// Submitted age.
        age: i64,
    },
    /// The age is above the maximum.
    #[error("age must be at most {max}")]
    AgeTooHigh {
        /// Maximum accepted age.
        max: u8,
        /// Submitted age.
        age: i64,
    },
}

impl RegistrationRejection {
    /// Stable reason code, e.g. `INSUFFICIENT_NAME_PARTS`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidNameChars => "INVALID_NAME_CHARS",
            Self::EmptyName => "EMPTY_NAME",
            Self::InsufficientNameParts { .. } => "INSUFFICIENT_NAME_PARTS",
            Self::NameLengthOutOfRange { .. } => "NAME_LENGTH_OUT_OF_RANGE",
            Self::InvalidEmailFormat => "INVALID_EMAIL_FORMAT",
            Self::DisposableEmailDomain { .. } => "DISPOSABLE_EMAIL_DOMAIN",
            Self::AgeTooLow { .. } => "AGE_TOO_LOW",
            Self::AgeTooHigh { .. } => "AGE_TOO_HIGH",
        }
    }

    /// Field the rejection is attributed to.
    #[must_use]
    pub const fn field(&self) -> RegistrationField {
        match self {
            Self::InvalidNameChars
            | Self::EmptyName
            | Self::InsufficientNameParts { .. }
            | Self::NameLengthOutOfRange { .. } => RegistrationField::Name,
            Self::InvalidEmailFormat | Self::DisposableEmailDomain { .. } => {
                RegistrationField::Email
            }
            Self::AgeTooLow { .. } | Self::AgeTooHigh { .. } => RegistrationField::Age,
        }
    }

    /// Structured context for clients, when the rule has any.
    #[must_use]
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::InsufficientNameParts { found } => Some(json!({ "found": found, "min": 2 })),
            Self::NameLengthOutOfRange { min, max, length } => {
                Some(json!({ "min": min, "max": max, "length": length }))
            }
            Self::DisposableEmailDomain { domain } => Some(json!({ "domain": domain })),
            Self::AgeTooLow { min, age } => Some(json!({ "min": min, "age": age })),
            Self::AgeTooHigh { max, age } => Some(json!({ "max": max, "age": age })),
            Self::InvalidNameChars | Self::EmptyName | Self::InvalidEmailFormat => None,
        }
    }
}

/// Validated registration ready for storage.
pub type NormalizedRegistration = NewUser;

/// Run every rule against `request`, returning normalised data or the first
/// rejection.
///
/// # Examples
/// ```
/// use user_registry::domain::registration::{
///     RegistrationRequest, ValidationPolicy, validate_registration,
/// };
///
/// let request = RegistrationRequest {
///     name: "  Ada Lovelace ".into(),
///     email: "Ada@Example.com".into(),
///     age: 36,
/// };
/// let accepted = validate_registration(&request, &ValidationPolicy::default())
///     .expect("valid registration");
/// assert_eq!(accepted.name.as_ref(), "Ada Lovelace");
/// assert_eq!(accepted.email.as_ref(), "ada@example.com");
/// ```
pub fn validate_registration(
    request: &RegistrationRequest,
    policy: &ValidationPolicy,
) -> Result<NormalizedRegistration, RegistrationRejection> {
    let name = validate_name(&request.name, policy)?;
    let email = validate_email(&request.email, policy)?;
    let age = validate_age(request.age, policy)?;
    Ok(NewUser { name, email, age })
}

/// Apply the name rules to `raw` and return the trimmed name.
pub fn validate_name(
    raw: &str,
    policy: &ValidationPolicy,
) -> Result<FullName, RegistrationRejection> {
    let trimmed = raw.trim();
    rules::NAME_RULES
        .iter()
        .try_for_each(|rule| rule(trimmed, policy))?;
    Ok(FullName::from_validated(trimmed))
}

/// Apply the email rules to `raw` and return the lower-cased address.
pub fn validate_email(
    raw: &str,
    policy: &ValidationPolicy,
) -> Result<EmailAddress, RegistrationRejection> {
    let trimmed = raw.trim();
    rules::EMAIL_RULES
        .iter()
        .try_for_each(|rule| rule(trimmed, policy))?;
    Ok(EmailAddress::from_validated(trimmed))
}

/// Apply the age rules to `age`.
pub fn validate_age(age: i64, policy: &ValidationPolicy) -> Result<Age, RegistrationRejection> {
    rules::AGE_RULES
        .iter()
        .try_for_each(|rule| rule(age, policy))?;
    let max = *policy.age().end();
    let years = u8::try_from(age).map_err(|_| RegistrationRejection::AgeTooHigh { max, age })?;
    Ok(Age::from_validated(years))
}
