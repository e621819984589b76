//! Registration domain service.
//!
//! Implements the driving ports on top of a [`UserRegistry`]: submissions are
//! validated in full before the registry is touched, so a rejected request
//! leaves stored state unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::error::{DUPLICATE_EMAIL_REASON, USER_NOT_FOUND_REASON};
use crate::domain::ports::{UserRegistrationCommand, UserRegistry, UserRegistryError, UsersQuery};
use crate::domain::registration::{
    RegistrationRejection, RegistrationRequest, ValidationPolicy, validate_registration,
};
use crate::domain::{Error, UserId, UserRecord};

/// Registration service implementing [`UserRegistrationCommand`] and
/// [`UsersQuery`].
pub struct RegistrationService<R> {
    registry: Arc<R>,
    policy: ValidationPolicy,
}

impl<R> Clone for RegistrationService<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            policy: self.policy.clone(),
        }
    }
}

impl<R> RegistrationService<R> {
    /// Create a service over `registry` enforcing `policy`.
    pub fn new(registry: Arc<R>, policy: ValidationPolicy) -> Self {
        Self { registry, policy }
    }
}

fn map_rejection(rejection: &RegistrationRejection) -> Error {
    let error = Error::validation(rejection.code(), rejection.to_string())
        .with_field(rejection.field().as_str());
    match rejection.details() {
        Some(details) => error.with_details(details),
        None => error,
    }
}

fn map_registry_error(error: UserRegistryError) -> Error {
    match error {
        UserRegistryError::DuplicateEmail { email } => Error::conflict(
            DUPLICATE_EMAIL_REASON,
            "a user with this email is already registered",
        )
        .with_field("email")
        .with_details(json!({ "email": email })),
        UserRegistryError::NotFound { id } => {
            Error::not_found(USER_NOT_FOUND_REASON, "user not found")
                .with_details(json!({ "id": id }))
        }
        UserRegistryError::Unavailable { message } => {
            Error::internal(format!("user registry unavailable: {message}"))
        }
    }
}

#[async_trait]
impl<R> UserRegistrationCommand for RegistrationService<R>
where
    R: UserRegistry,
{
    async fn register(&self, request: RegistrationRequest) -> Result<UserRecord, Error> {
        let user = validate_registration(&request, &self.policy).map_err(|rejection| {
            debug!(
                field = rejection.field().as_str(),
                reason = rejection.code(),
                "registration rejected"
            );
            map_rejection(&rejection)
        })?;

        let record = self.registry.insert(user).await.map_err(|error| {
            debug!(%error, "registration refused by registry");
            map_registry_error(error)
        })?;

        info!(user_id = %record.id(), "user registered");
        Ok(record)
    }
}

#[async_trait]
impl<R> UsersQuery for RegistrationService<R>
where
    R: UserRegistry,
{
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        self.registry.list_all().await.map_err(map_registry_error)
    }

    async fn find_user(&self, id: &UserId) -> Result<UserRecord, Error> {
        self.registry.get(id).await.map_err(map_registry_error)
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
