//! Driving port for submitting registrations.
//!
//! Inbound adapters hand raw submissions to this port and receive either the
//! stored record or a domain [`Error`] already classified for transport.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationRequest, UserRecord};

/// Domain use-case port for registering users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistrationCommand: Send + Sync {
    /// Validate `request` and store it when every rule passes.
    async fn register(&self, request: RegistrationRequest) -> Result<UserRecord, Error>;
}
