//! Driven port for the store that owns accepted user records.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, UserId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user registry adapters.
    pub enum UserRegistryError {
        /// A record with the same normalised email already exists.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// No record carries the requested identifier.
        NotFound { id: String } => "user not found: {id}",
        /// The registry could not serve the request.
        Unavailable { message: String } => "user registry unavailable: {message}",
    }
}

impl UserRegistryError {
    /// Duplicate-email error for a normalised address.
    pub fn duplicate(email: &EmailAddress) -> Self {
        Self::duplicate_email(email.as_ref())
    }
}

/// Authoritative collection of accepted users.
///
/// `insert` must check email uniqueness and store the record as one atomic
/// step; on [`UserRegistryError::DuplicateEmail`] the registry is unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Assign an identifier and timestamp to `user` and store it.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, UserRegistryError>;

    /// Fetch a record by identifier.
    async fn get(&self, id: &UserId) -> Result<UserRecord, UserRegistryError>;

    /// Every stored record in insertion order.
    async fn list_all(&self) -> Result<Vec<UserRecord>, UserRegistryError>;
}
