//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the DTO schemas of the
//! inbound layer. The document backs Swagger UI (when `debug` is enabled) and
//! is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::service_info::{EndpointIndex, ServiceInfo};
use crate::inbound::http::users::{RegisterUserRequest, UserResponse, UsersListResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "Validates user registrations and keeps accepted users in memory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::service_info::service_info,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterUserRequest,
        UserResponse,
        UsersListResponse,
        ErrorResponse,
        ServiceInfo,
        EndpointIndex
    )),
    tags(
        (name = "users", description = "Registration and lookup of users"),
        (name = "service", description = "Service metadata"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
