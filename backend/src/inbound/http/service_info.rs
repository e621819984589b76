//! Root endpoint describing the service.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Routes advertised by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EndpointIndex {
    /// Registration route.
    #[schema(example = "/api/usuarios/registrar")]
    pub register: String,
    /// Listing route.
    #[schema(example = "/api/usuarios")]
    pub list: String,
    /// Lookup route.
    #[schema(example = "/api/usuarios/{id}")]
    pub get: String,
    /// Interactive documentation, present only when enabled.
    #[schema(example = "/docs")]
    pub docs: Option<String>,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// Crate name.
    #[schema(example = "user-registry")]
    pub name: String,
    /// Crate version.
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Advertised routes.
    pub endpoints: EndpointIndex,
}

impl ServiceInfo {
    /// Describe this build; `docs_enabled` controls whether `/docs` is listed.
    pub fn new(docs_enabled: bool) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            endpoints: EndpointIndex {
                register: "/api/usuarios/registrar".to_owned(),
                list: "/api/usuarios".to_owned(),
                get: "/api/usuarios/{id}".to_owned(),
                docs: docs_enabled.then(|| "/docs".to_owned()),
            },
        }
    }
}

/// Service name, version and route index.
#[utoipa::path(
    get,
    path = "/",
    tags = ["service"],
    responses((status = 200, description = "Service description", body = ServiceInfo))
)]
#[get("/")]
pub async fn service_info(info: web::Data<ServiceInfo>) -> web::Json<ServiceInfo> {
    web::Json(info.get_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use rstest::rstest;

    #[rstest]
    #[case(true, Some("/docs"))]
    #[case(false, None)]
    #[actix_web::test]
    async fn root_lists_endpoints(#[case] docs_enabled: bool, #[case] docs: Option<&str>) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ServiceInfo::new(docs_enabled)))
                .service(service_info),
        )
        .await;

        let body: ServiceInfo =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request())
                .await;

        assert_eq!(body.name, "user-registry");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(body.endpoints.register, "/api/usuarios/registrar");
        assert_eq!(body.endpoints.docs.as_deref(), docs);
    }
}
