//! Registered user entity and its value types.
//!
//! [`FullName`], [`EmailAddress`] and [`Age`] can only be obtained from the
//! registration validator (see [`crate::domain::registration`]), so holding
//! one is proof that the corresponding rule set passed.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Errors raised when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    /// The identifier was blank.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier is not a canonical UUID.
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Opaque user identifier backed by a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid, String);

impl UserId {
    /// Parse an identifier from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdError::Invalid);
        }
        let parsed = Uuid::parse_str(id).map_err(|_| UserIdError::Invalid)?;
        Ok(Self::from_uuid(parsed))
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Trimmed personal name made of at least a first name and a surname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub(crate) fn from_validated(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

/// Lower-cased, syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub(crate) fn from_validated(email: &str) -> Self {
        Self(email.to_lowercase())
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Age in whole years within the configured registration bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(u8);

impl Age {
    pub(crate) const fn from_validated(years: u8) -> Self {
        Self(years)
    }

    /// Age in years.
    #[must_use]
    pub const fn years(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated registration data awaiting an identifier and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Trimmed full name.
    pub name: FullName,
    /// Lower-cased email address.
    pub email: EmailAddress,
    /// Age in years.
    pub age: Age,
}

/// Accepted registration as held by the registry.
///
/// ## Invariants
/// - Every field is set once at insertion time and never mutated.
/// - `email` is unique across the registry that owns the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    name: FullName,
    email: EmailAddress,
    age: Age,
    registered_at: DateTime<Utc>,
}

impl UserRecord {
    /// Stamp validated data with its identifier and registration time.
    #[must_use]
    pub fn new(id: UserId, user: NewUser, registered_at: DateTime<Utc>) -> Self {
        let NewUser { name, email, age } = user;
        Self {
            id,
            name,
            email,
            age,
            registered_at,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Trimmed full name.
    #[must_use]
    pub fn name(&self) -> &FullName {
        &self.name
    }

    /// Lower-cased email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Age in years.
    #[must_use]
    pub fn age(&self) -> Age {
        self.age
    }

    /// Moment the record was accepted.
    #[must_use]
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

#[cfg(test)]
mod tests;
