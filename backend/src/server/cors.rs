//! Cross-origin policy for browser clients.
//!
//! Debug deployments accept any origin. Otherwise only the configured origins
//! may call the API; by default these are the local front-end dev servers.

use actix_cors::Cors;
use actix_web::http::Uri;
use thiserror::Error;

/// Origins allowed when none are configured.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// An allow-list entry that cannot be matched against an `Origin` header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid CORS origin `{origin}`: expected scheme://host[:port]")]
pub struct CorsOriginError {
    /// Offending entry.
    pub origin: String,
}

/// Which origins may make cross-origin requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, with credentials. Used in debug mode.
    Permissive,
    /// Only the listed origins.
    AllowList(Vec<String>),
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::AllowList(
            DEFAULT_CORS_ORIGINS
                .iter()
                .map(|origin| (*origin).to_owned())
                .collect(),
        )
    }
}

impl CorsPolicy {
    /// Build an allow-list from raw entries.
    ///
    /// Entries are trimmed and blank ones dropped. A `*` entry makes the
    /// policy permissive.
    ///
    /// # Examples
    /// ```
    /// use user_registry::server::CorsPolicy;
    ///
    /// let policy = CorsPolicy::from_origins(["https://app.example.com", " "])
    ///     .expect("valid origins");
    /// assert_eq!(
    ///     policy,
    ///     CorsPolicy::AllowList(vec!["https://app.example.com".to_owned()])
    /// );
    /// assert_eq!(
    ///     CorsPolicy::from_origins(["*"]).expect("wildcard"),
    ///     CorsPolicy::Permissive
    /// );
    /// ```
    pub fn from_origins<I, S>(origins: I) -> Result<Self, CorsOriginError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed = Vec::new();
        for raw in origins {
            let origin = raw.as_ref().trim();
            if origin.is_empty() {
                continue;
            }
            if origin == "*" {
                return Ok(Self::Permissive);
            }
            if !is_origin(origin) {
                return Err(CorsOriginError {
                    origin: origin.to_owned(),
                });
            }
            if !allowed.iter().any(|known: &String| known == origin) {
                allowed.push(origin.to_owned());
            }
        }
        Ok(Self::AllowList(allowed))
    }

    /// Middleware enforcing this policy.
    pub fn middleware(&self) -> Cors {
        match self {
            Self::Permissive => Cors::permissive(),
            Self::AllowList(origins) => origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(PREFLIGHT_MAX_AGE_SECS),
        }
    }
}

// actix-cors defers malformed origins to app start-up; reject them earlier.
fn is_origin(origin: &str) -> bool {
    Uri::try_from(origin).is_ok_and(|uri| {
        uri.scheme().is_some()
            && uri.host().is_some()
            && uri
                .path_and_query()
                .is_none_or(|pq| matches!(pq.as_str(), "" | "/"))
    })
}
