//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without a real registry.

use std::sync::Arc;

use crate::domain::RegistrationService;
use crate::domain::ports::{UserRegistrationCommand, UserRegistry, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Handles `POST /api/usuarios/registrar`.
    pub registration: Arc<dyn UserRegistrationCommand>,
    /// Handles listing and lookup.
    pub users: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_registry::domain::{RegistrationService, ValidationPolicy};
    /// use user_registry::inbound::http::state::HttpState;
    /// use user_registry::outbound::memory::InMemoryUserRegistry;
    ///
    /// let service = Arc::new(RegistrationService::new(
    ///     Arc::new(InMemoryUserRegistry::default()),
    ///     ValidationPolicy::default(),
    /// ));
    /// let _state = HttpState::new(service.clone(), service);
    /// ```
    pub fn new(
        registration: Arc<dyn UserRegistrationCommand>,
        users: Arc<dyn UsersQuery>,
    ) -> Self {
        Self {
            registration,
            users,
        }
    }

    /// Wire both ports to one [`RegistrationService`].
    pub fn from_service<R>(service: Arc<RegistrationService<R>>) -> Self
    where
        R: UserRegistry + 'static,
    {
        Self {
            registration: service.clone(),
            users: service,
        }
    }
}
