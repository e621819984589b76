//! In-process registry adapter.
//!
//! Records live only as long as the process. The whole state sits behind a
//! single `RwLock`, and `insert` holds the write guard across the uniqueness
//! check and the push, so two concurrent registrations of one address cannot
//! both succeed.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::error;

use crate::domain::ports::{UserRegistry, UserRegistryError};
use crate::domain::{EmailAddress, NewUser, UserId, UserRecord};

#[derive(Debug, Default)]
struct RegistryState {
    records: Vec<UserRecord>,
    by_id: HashMap<UserId, usize>,
    emails: HashSet<EmailAddress>,
}

impl RegistryState {
    fn fresh_id(&self) -> UserId {
        loop {
            let id = UserId::random();
            if !self.by_id.contains_key(&id) {
                return id;
            }
        }
    }
}

/// [`UserRegistry`] backed by process memory.
///
/// # Examples
/// ```
/// use user_registry::outbound::memory::InMemoryUserRegistry;
///
/// let registry = InMemoryUserRegistry::default();
/// assert!(registry.is_empty());
/// ```
pub struct InMemoryUserRegistry {
    state: RwLock<RegistryState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRegistry {
    /// Create an empty registry stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            clock,
        }
    }

    /// Number of stored records; a poisoned lock reads as empty.
    pub fn len(&self) -> usize {
        self.state.read().map_or(0, |state| state.records.len())
    }

    /// Whether no record has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryUserRegistry {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

fn poisoned<T>(_: T) -> UserRegistryError {
    error!("user registry lock poisoned");
    UserRegistryError::unavailable("registry lock poisoned")
}

#[async_trait]
impl UserRegistry for InMemoryUserRegistry {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, UserRegistryError> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.emails.contains(&user.email) {
            return Err(UserRegistryError::duplicate(&user.email));
        }

        let id = state.fresh_id();
        let record = UserRecord::new(id.clone(), user, self.clock.utc());
        let position = state.records.len();
        state.emails.insert(record.email().clone());
        state.by_id.insert(id, position);
        state.records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: &UserId) -> Result<UserRecord, UserRegistryError> {
        let state = self.state.read().map_err(poisoned)?;
        state
            .by_id
            .get(id)
            .and_then(|&position| state.records.get(position))
            .cloned()
            .ok_or_else(|| UserRegistryError::not_found(id.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, UserRegistryError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.records.clone())
    }
}
