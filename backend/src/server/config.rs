//! Resolved inputs for building the HTTP server.

use super::CorsPolicy;
use crate::domain::ValidationPolicy;
use crate::settings::{RegistrySettings, SettingsError};

/// Everything [`super::create_server`] needs, already checked.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) policy: ValidationPolicy,
    pub(crate) docs_enabled: bool,
    pub(crate) metrics_enabled: bool,
    pub(crate) cors: CorsPolicy,
}

impl ServerConfig {
    /// Default policy, docs off, metrics off, local front-end origins.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            bind_addr: (host.into(), port),
            policy: ValidationPolicy::default(),
            docs_enabled: false,
            metrics_enabled: false,
            cors: CorsPolicy::default(),
        }
    }

    /// Resolve a configuration from loaded settings.
    pub fn from_settings(settings: &RegistrySettings) -> Result<Self, SettingsError> {
        let (host, port) = settings.bind_address()?;
        Ok(Self::new(host, port)
            .with_policy(settings.validation_policy()?)
            .with_docs(settings.debug)
            .with_metrics(settings.enable_metrics)
            .with_cors(settings.cors_policy()?))
    }

    /// Validation bounds and block-list for registrations.
    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Serve Swagger UI at `/docs`.
    #[must_use]
    pub fn with_docs(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }

    /// Serve Prometheus metrics at `/metrics`; ignored without the `metrics`
    /// feature.
    #[must_use]
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// Origins allowed to call the API from a browser.
    #[must_use]
    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    /// Address the server will bind.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.bind_addr.0.as_str(), self.bind_addr.1)
    }
}
