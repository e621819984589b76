//! Users API handlers.
//!
//! ```text
//! POST /api/usuarios/registrar {"name":"Ana López","email":"ana@ejemplo.com","age":29}
//! GET  /api/usuarios
//! GET  /api/usuarios/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::error::USER_NOT_FOUND_REASON;
use crate::domain::{Error, RegistrationRequest, UserId, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/usuarios/registrar`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterUserRequest {
    /// First name and surname, letters and spaces only.
    #[schema(example = "Ana María Rodríguez López")]
    pub name: String,
    /// Contact address; stored lower-cased.
    #[schema(example = "ana.rodriguez@ejemplo.com")]
    pub email: String,
    /// Age in whole years.
    #[schema(example = 29)]
    pub age: i64,
}

impl From<RegisterUserRequest> for RegistrationRequest {
    fn from(value: RegisterUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            age: value.age,
        }
    }
}

/// Stored user as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    /// UUID assigned at registration.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Trimmed full name.
    #[schema(example = "Ana María Rodríguez López")]
    pub name: String,
    /// Lower-cased email address.
    #[schema(example = "ana.rodriguez@ejemplo.com")]
    pub email: String,
    /// Age in years.
    #[schema(example = 29)]
    pub age: u8,
    /// Registration instant, UTC.
    pub registered_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.name().to_string(),
            email: record.email().to_string(),
            age: record.age().years(),
            registered_at: record.registered_at(),
        }
    }
}

/// Body of `GET /api/usuarios`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UsersListResponse {
    /// Users in registration order.
    pub users: Vec<UserResponse>,
    /// Number of users returned.
    pub total: usize,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/usuarios/registrar",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/usuarios/registrar")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let record = state
        .registration
        .register(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(record)))
}

/// List every registered user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/usuarios",
    responses(
        (status = 200, description = "Registered users", body = UsersListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/usuarios")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersListResponse>> {
    let users: Vec<UserResponse> = state
        .users
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    let total = users.len();
    Ok(web::Json(UsersListResponse { users, total }))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/usuarios/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let raw = path.into_inner();
    // An id that cannot name a record is reported like an unknown one.
    let id = UserId::new(&raw).map_err(|err| {
        debug!(id = %raw, error = %err, "unparseable user id");
        Error::not_found(USER_NOT_FOUND_REASON, "user not found")
    })?;
    let record = state.users.find_user(&id).await?;
    Ok(web::Json(UserResponse::from(record)))
}
