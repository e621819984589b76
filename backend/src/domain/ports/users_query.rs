//! Driving port for reading registered users.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserRecord};

/// Domain use-case port for listing and fetching users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user in registration order.
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error>;

    /// A single user by identifier.
    async fn find_user(&self, id: &UserId) -> Result<UserRecord, Error>;
}
