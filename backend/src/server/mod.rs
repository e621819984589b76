//! Server construction and middleware wiring.

mod config;
mod cors;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::ServerConfig;
pub use cors::{CorsOriginError, CorsPolicy, DEFAULT_CORS_ORIGINS};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
use crate::doc::ApiDoc;
use crate::domain::{RegistrationService, ValidationPolicy};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::service_info::{ServiceInfo, service_info};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{get_user, list_users, register_user};
use crate::inbound::http::validation::json_config;
use crate::outbound::memory::InMemoryUserRegistry;
#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

/// Shared data handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags flipped by the bootstrap.
    pub health_state: web::Data<HealthState>,
    /// Driving ports used by the users handlers.
    pub http_state: web::Data<HttpState>,
    /// Payload of `GET /`.
    pub service_info: web::Data<ServiceInfo>,
    /// Serve Swagger UI and the OpenAPI document.
    pub docs_enabled: bool,
    /// Cross-origin policy wrapped around every route.
    pub cors: CorsPolicy,
}

impl AppDependencies {
    /// Dependencies over a fresh in-memory registry with the default
    /// cross-origin allow-list.
    pub fn in_memory(
        health_state: web::Data<HealthState>,
        policy: ValidationPolicy,
        docs_enabled: bool,
    ) -> Self {
        let service = Arc::new(RegistrationService::new(
            Arc::new(InMemoryUserRegistry::default()),
            policy,
        ));
        Self {
            health_state,
            http_state: web::Data::new(HttpState::from_service(service)),
            service_info: web::Data::new(ServiceInfo::new(docs_enabled)),
            docs_enabled,
            cors: CorsPolicy::default(),
        }
    }

    /// Replace the cross-origin policy.
    #[must_use]
    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }
}

/// Assemble routes and middleware for one worker.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use user_registry::domain::ValidationPolicy;
/// use user_registry::inbound::http::health::HealthState;
/// use user_registry::server::{AppDependencies, build_app};
///
/// let deps = AppDependencies::in_memory(
///     web::Data::new(HealthState::new()),
///     ValidationPolicy::default(),
///     false,
/// );
/// let _app = build_app(deps);
/// ```
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        service_info: info,
        docs_enabled,
        cors,
    } = deps;

    let api = web::scope("/api")
        .service(register_user)
        .service(list_users)
        .service(get_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(info)
        .app_data(json_config())
        .wrap(cors.middleware())
        .wrap(Trace)
        .service(api)
        .service(service_info)
        .service(ready)
        .service(live);

    if docs_enabled {
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        app
    }
}

/// Bind and start the HTTP server.
///
/// Registry state is created once here and shared by every worker. Readiness
/// flips once the listener is bound. Signal handling is left to the caller,
/// which should stop the server through [`drain_on_shutdown`].
///
/// # Errors
/// Propagates [`std::io::Error`] when metrics registration or binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        policy,
        docs_enabled,
        metrics_enabled,
        cors,
    } = config;
    let deps =
        AppDependencies::in_memory(health_state.clone(), policy, docs_enabled).with_cors(cors);

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::build(metrics_enabled)?;
    #[cfg(not(feature = "metrics"))]
    if metrics_enabled {
        tracing::warn!("metrics requested but the binary was built without the `metrics` feature");
    }

    let server = HttpServer::new(move || {
        let app = build_app(deps.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .disable_signals()
    .bind(bind_addr.clone())?
    .run();

    health_state.mark_ready();
    info!(host = %bind_addr.0, port = bind_addr.1, docs_enabled, "server listening");
    Ok(server)
}

/// Wait for `shutdown`, fail liveness, give orchestrators `grace` to notice,
/// then stop the server gracefully.
pub async fn drain_on_shutdown(
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
    shutdown: impl Future<Output = ()>,
    grace: Duration,
) {
    shutdown.await;
    health_state.mark_unhealthy();
    info!(grace_secs = grace.as_secs(), "draining before shutdown");
    actix_web::rt::time::sleep(grace).await;
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{Method, StatusCode, header};
    use actix_web::test;
    use rstest::rstest;

    fn deps(docs_enabled: bool) -> AppDependencies {
        AppDependencies::in_memory(
            web::Data::new(HealthState::new()),
            ValidationPolicy::default(),
            docs_enabled,
        )
    }

    #[rstest]
    #[case(true, StatusCode::OK)]
    #[case(false, StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn openapi_document_follows_docs_flag(
        #[case] docs_enabled: bool,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(build_app(deps(docs_enabled))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api-docs/openapi.json")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn workers_share_one_registry() {
        let shared = deps(false);
        let first = test::init_service(build_app(shared.clone())).await;
        let second = test::init_service(build_app(shared)).await;

        let created = test::call_service(
            &first,
            test::TestRequest::post()
                .uri("/api/usuarios/registrar")
                .set_json(serde_json::json!({
                    "name": "Ana López",
                    "email": "ana@ejemplo.com",
                    "age": 30
                }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::call_and_read_body_json(
            &second,
            test::TestRequest::get().uri("/api/usuarios").to_request(),
        )
        .await;
        assert_eq!(body["total"], 1);
    }

    #[rstest]
    #[case(CorsPolicy::Permissive, "https://front.example")]
    #[case(CorsPolicy::default(), "http://127.0.0.1:8080")]
    #[actix_web::test]
    async fn registration_preflight_is_answered(
        #[case] cors: CorsPolicy,
        #[case] origin: &str,
    ) {
        let app = test::init_service(build_app(deps(false).with_cors(cors))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::default()
                .method(Method::OPTIONS)
                .uri("/api/usuarios/registrar")
                .insert_header((header::ORIGIN, origin))
                .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some(origin)
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn draining_fails_liveness_and_stops_the_server() {
        let health = web::Data::new(HealthState::new());
        let server = create_server(health.clone(), ServerConfig::new("127.0.0.1", 0))
            .expect("server binds");
        assert!(health.is_ready());
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain_on_shutdown(health.clone(), handle, async {}, Duration::ZERO).await;

        assert!(!health.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_routes_keep_framework_not_found() {
        let app = test::init_service(build_app(deps(false))).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
