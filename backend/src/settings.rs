//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `REGISTRY_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence. Unset values fall
//! back to the defaults below.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::registration::{
    AGE_MAX, AGE_MIN, NAME_LENGTH_MAX, NAME_LENGTH_MIN, PolicyError, ValidationPolicy,
};
use crate::server::{CorsOriginError, CorsPolicy};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// Inconsistent configuration detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Port 0 would bind an ephemeral port.
    #[error("port must be between 1 and 65535")]
    InvalidPort,
    /// Host is blank.
    #[error("host must not be empty")]
    EmptyHost,
    /// Name or age bounds are inconsistent.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// A CORS origin is not `scheme://host[:port]`.
    #[error(transparent)]
    Cors(#[from] CorsOriginError),
}

/// Configuration for the registry service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct RegistrySettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Enable Swagger UI and human-readable logs.
    #[ortho_config(default = false)]
    pub debug: bool,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    /// Minimum accepted name length in characters.
    pub name_min_length: Option<usize>,
    /// Maximum accepted name length in characters.
    pub name_max_length: Option<usize>,
    /// Minimum accepted age.
    pub age_min: Option<u8>,
    /// Maximum accepted age.
    pub age_max: Option<u8>,
    /// Comma-separated disposable domains replacing the built-in list.
    pub blocked_domains: Option<String>,
    /// Expose Prometheus metrics at `/metrics` (needs the `metrics` feature).
    #[ortho_config(default = false)]
    pub enable_metrics: bool,
    /// Comma-separated browser origins allowed outside debug mode.
    pub cors_origins: Option<String>,
    /// Seconds between failing liveness and stopping the server.
    pub shutdown_grace_secs: Option<u64>,
}

impl RegistrySettings {
    /// Interface to bind, defaulting to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind, defaulting to 8000.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Delay between failing liveness and stopping the server.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(
            self.shutdown_grace_secs
                .unwrap_or(DEFAULT_SHUTDOWN_GRACE_SECS),
        )
    }

    /// Cross-origin policy: any origin in debug mode, otherwise the configured
    /// origins or the local front-end defaults.
    pub fn cors_policy(&self) -> Result<CorsPolicy, SettingsError> {
        if self.debug {
            return Ok(CorsPolicy::Permissive);
        }
        match &self.cors_origins {
            Some(list) => Ok(CorsPolicy::from_origins(list.split(','))?),
            None => Ok(CorsPolicy::default()),
        }
    }

    /// Checked `(host, port)` pair for binding.
    pub fn bind_address(&self) -> Result<(String, u16), SettingsError> {
        let host = self.host().trim();
        if host.is_empty() {
            return Err(SettingsError::EmptyHost);
        }
        match self.port() {
            0 => Err(SettingsError::InvalidPort),
            port => Ok((host.to_owned(), port)),
        }
    }

    /// Build the validator policy from the configured bounds and block-list.
    ///
    /// # Examples
    /// ```
    /// use user_registry::settings::RegistrySettings;
    ///
    /// let settings = RegistrySettings {
    ///     age_min: Some(18),
    ///     blocked_domains: Some("spam.example, junk.example".into()),
    ///     ..RegistrySettings::default()
    /// };
    /// let policy = settings.validation_policy().expect("consistent bounds");
    /// assert_eq!(*policy.age().start(), 18);
    /// assert!(policy.is_blocked_domain("junk.example"));
    /// assert!(!policy.is_blocked_domain("mailinator.com"));
    /// ```
    pub fn validation_policy(&self) -> Result<ValidationPolicy, SettingsError> {
        let name_length = self.name_min_length.unwrap_or(NAME_LENGTH_MIN)
            ..=self.name_max_length.unwrap_or(NAME_LENGTH_MAX);
        let age = self.age_min.unwrap_or(AGE_MIN)..=self.age_max.unwrap_or(AGE_MAX);
        let policy = ValidationPolicy::new(name_length, age)?;
        Ok(match &self.blocked_domains {
            Some(list) => policy.with_blocked_domains(list.split(',')),
            None => policy,
        })
    }
}
