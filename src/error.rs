use thiserror::Error;

use crate::routes::paths::PathKey;

/// RouteOrderingError
///
/// Raised while a router is being defined, when a public-only build is requested
/// after a protected or combined build in the same definition. Public route groups
/// must be declared first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "coherence public routes requested after protected routes in the same router; \
     declare the public routes first"
)]
pub struct RouteOrderingError;

/// ConfigError
///
/// Startup configuration failures. The binary treats every variant as fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable required for the current environment is unset.
    #[error("{0} must be set in production")]
    MissingVar(&'static str),

    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A configured path template that cannot be mounted: it does not start with
    /// `/`, or it makes two routes share a method and path.
    #[error("invalid route template for {key}: {path:?}")]
    InvalidRoute { key: PathKey, path: String },

    #[error("invalid BIND_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
