//! Optional Prometheus middleware.
//!
//! When enabled, `actix-web-prom` records request counters and latency
//! histograms and serves them at `/metrics`. When disabled the layer only
//! boxes the response body so both variants share one service type.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;

const METRICS_NAMESPACE: &str = "user_registry";
const METRICS_ENDPOINT: &str = "/metrics";

/// Prometheus middleware, or a pass-through when metrics are off.
#[derive(Clone)]
pub enum MetricsLayer {
    /// Records request metrics and serves `/metrics`.
    Enabled(Arc<PrometheusMetrics>),
    /// Forwards requests untouched.
    Disabled,
}

impl MetricsLayer {
    /// Build the layer, registering collectors only when `enabled`.
    pub fn build(enabled: bool) -> std::io::Result<Self> {
        if !enabled {
            return Ok(Self::Disabled);
        }
        let metrics = PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
            .endpoint(METRICS_ENDPOINT)
            .build()
            .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))?;
        Ok(Self::Enabled(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            MetricsLayer::Enabled(metrics) => {
                let fut = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(fut.await?)) })
            }
            MetricsLayer::Disabled => Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            }),
        }
    }
}
