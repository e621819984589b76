//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::Trace;
use crate::domain::{RegistrationService, ValidationPolicy};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{users, validation};
use crate::outbound::memory::InMemoryUserRegistry;

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Instant every test registration is stamped with.
pub fn registration_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

/// State backed by a fresh in-memory registry and the default policy.
pub fn memory_state() -> HttpState {
    let registry = InMemoryUserRegistry::new(Arc::new(FixedClock(registration_instant())));
    HttpState::from_service(Arc::new(RegistrationService::new(
        Arc::new(registry),
        ValidationPolicy::default(),
    )))
}

/// App exposing the users API over `state`, wrapped in [`Trace`].
pub fn users_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(validation::json_config())
        .wrap(Trace)
        .service(
            web::scope("/api")
                .service(users::register_user)
                .service(users::list_users)
                .service(users::get_user),
        )
}
