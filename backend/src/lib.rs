//! User registration service.
//!
//! The domain layer validates registrations and owns the port traits; the
//! inbound HTTP adapter and the in-memory outbound adapter plug into those
//! ports, and [`server`] wires them into an Actix application.

#![warn(missing_docs)]

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
