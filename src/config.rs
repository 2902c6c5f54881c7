use serde::Deserialize;
use std::{env, fs, net::SocketAddr};

use crate::{error::ConfigError, registry::CapabilityRegistry, routes::paths::RoutePaths};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// AppConfig
///
/// Holds the application's entire configuration state. Immutable once loaded:
/// the capability registry and the default path table are read by every router
/// definition built from it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and whether a settings file is mandatory.
    pub env: Env,
    // Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    // Enabled capabilities and their actions.
    pub registry: CapabilityRegistry,
    // Path templates every router definition starts from.
    pub default_routes: RoutePaths,
}

/// Env
///
/// Defines the runtime context.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// CoherenceSettings
///
/// Shape of the JSON settings file named by `COHERENCE_CONFIG`:
///
/// ```json
/// {
///   "capabilities": { "authenticatable": "all", "registerable": ["new", "create"] },
///   "default_routes": { "sessions": "/login" }
/// }
/// ```
///
/// Both sections are optional. A missing `capabilities` section enables nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoherenceSettings {
    #[serde(default)]
    pub capabilities: CapabilityRegistry,
    #[serde(default)]
    pub default_routes: RoutePaths,
}

impl CoherenceSettings {
    /// Reads, parses and validates the settings file at `path`.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        settings.default_routes.validate()?;
        Ok(settings)
    }
}

impl Default for AppConfig {
    /// default
    ///
    /// A local configuration with every capability enabled and the built-in paths.
    /// Used for test setup.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            registry: CapabilityRegistry::all(),
            default_routes: RoutePaths::default(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Initializes the configuration at startup from environment variables:
    /// - `APP_ENV`: `production` or anything else for local.
    /// - `BIND_ADDR`: listen address, `0.0.0.0:3000` when unset.
    /// - `COHERENCE_CONFIG`: path to the JSON settings file. Optional locally, where
    ///   every capability is enabled when it is absent; mandatory in production.
    ///
    /// # Errors
    /// Fails fast on a missing production settings file, an unreadable or malformed
    /// settings file, a route template that cannot be mounted, or an unparsable
    /// bind address.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let bind_value = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_value
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let settings = match (env, env::var("COHERENCE_CONFIG")) {
            (_, Ok(path)) => CoherenceSettings::from_file(&path)?,
            (Env::Production, Err(_)) => return Err(ConfigError::MissingVar("COHERENCE_CONFIG")),
            // Local development without a settings file exposes the whole table.
            (Env::Local, Err(_)) => CoherenceSettings {
                capabilities: CapabilityRegistry::all(),
                default_routes: RoutePaths::default(),
            },
        };

        Ok(Self {
            env,
            bind_addr,
            registry: settings.capabilities,
            default_routes: settings.default_routes,
        })
    }
}
