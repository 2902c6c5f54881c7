//! Route Table Module Index
//!
//! The fixed declarative route table is split into two security partitions, and
//! `RouterDefinition` turns it into concrete routes for one router, filtered by the
//! capability registry and resolved against the configured paths.
//!
//! The partitions map directly to how the host mounts them.

/// Entries reachable anonymously.
pub mod public;

/// Entries that assume a signed-in user.
pub mod protected;

pub mod mount;
pub mod paths;
pub mod table;

use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{
    error::RouteOrderingError,
    models::ResolvedRoute,
    registry::CapabilityRegistry,
};
use paths::{PathKey, RoutePaths};
use table::RouteGroup;

pub use mount::{HandlerSource, mount};

// --- Call-Site Options ---

/// RoutingMode
///
/// Which partition of the table a build emits. Defaults to `Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingMode {
    #[default]
    Public,
    Protected,
    All,
    /// Old name of `Protected`. Still accepted; every use logs a deprecation warning.
    #[deprecated(note = "use RoutingMode::Protected")]
    Private,
}

impl RoutingMode {
    /// The partitions emitted for this mode, in emission order.
    #[allow(deprecated)]
    fn groups(self) -> &'static [RouteGroup] {
        match self {
            RoutingMode::Public => &[RouteGroup::Public],
            RoutingMode::Protected | RoutingMode::Private => &[RouteGroup::Protected],
            RoutingMode::All => &[RouteGroup::Public, RouteGroup::Protected],
        }
    }

    fn includes_protected(self) -> bool {
        self.groups().contains(&RouteGroup::Protected)
    }

    #[allow(deprecated)]
    fn is_deprecated_alias(self) -> bool {
        self == RoutingMode::Private
    }
}

impl fmt::Display for RoutingMode {
    #[allow(deprecated)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoutingMode::Public => "public",
            RoutingMode::Protected => "protected",
            RoutingMode::All => "all",
            RoutingMode::Private => "private",
        };
        f.write_str(name)
    }
}

/// Parses `public`, `protected`, `all` or the deprecated `private`. A leading `:`
/// is accepted so modes can be written the way route declarations usually spell them.
impl FromStr for RoutingMode {
    type Err = UnknownRoutingMode;

    #[allow(deprecated)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(':') {
            "public" => Ok(RoutingMode::Public),
            "protected" => Ok(RoutingMode::Protected),
            "all" => Ok(RoutingMode::All),
            "private" => Ok(RoutingMode::Private),
            _ => Err(UnknownRoutingMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown routing mode {0:?}")]
pub struct UnknownRoutingMode(pub String);

/// RouteOptions
///
/// Per-call options. `custom_routes` overrides individual path templates for this
/// build only; keys it does not name keep the definition's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    pub custom_routes: BTreeMap<PathKey, String>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn custom_route(mut self, key: PathKey, path: impl Into<String>) -> Self {
        self.custom_routes.insert(key, path.into());
        self
    }
}

// --- Router Definition ---

/// RouterDefinition
///
/// One router being defined. Every `build_routes` call for the same router goes
/// through the same definition, which is what lets it enforce that public routes
/// are declared before protected ones. Dropping the definition ends the scope; a
/// new definition starts with a clean slate.
#[derive(Debug)]
pub struct RouterDefinition<'a> {
    registry: &'a CapabilityRegistry,
    default_paths: RoutePaths,
    protected_built: bool,
    warnings: Vec<String>,
}

impl<'a> RouterDefinition<'a> {
    /// Starts a definition using the built-in path templates.
    pub fn new(registry: &'a CapabilityRegistry) -> Self {
        Self::with_paths(registry, RoutePaths::default())
    }

    /// Starts a definition whose defaults are `default_paths` (typically the
    /// configured `default_routes`).
    pub fn with_paths(registry: &'a CapabilityRegistry, default_paths: RoutePaths) -> Self {
        Self {
            registry,
            default_paths,
            protected_built: false,
            warnings: Vec::new(),
        }
    }

    /// Whether a protected or combined build has completed in this definition.
    pub fn protected_built(&self) -> bool {
        self.protected_built
    }

    /// Deprecation warnings raised by builds in this definition.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// coherence_routes
    ///
    /// Call-site entry point where both arguments may be left out: no mode means
    /// `Public`, no options means the definition's paths unchanged.
    ///
    /// ```ignore
    /// let public = definition.coherence_routes(None, None)?;
    /// let protected = definition.coherence_routes(Some(RoutingMode::Protected), Some(&opts))?;
    /// ```
    pub fn coherence_routes(
        &mut self,
        mode: Option<RoutingMode>,
        opts: Option<&RouteOptions>,
    ) -> Result<Vec<ResolvedRoute>, RouteOrderingError> {
        let defaults = RouteOptions::default();
        self.build_routes(mode.unwrap_or_default(), opts.unwrap_or(&defaults))
    }

    /// build_routes
    ///
    /// Walks the fixed route table for `mode` and returns the routes whose
    /// (capability, action) pair is enabled in the registry, in table order, with
    /// paths resolved against the defaults merged with `opts.custom_routes`.
    ///
    /// # Errors
    /// `RouteOrderingError` when `mode` is `Public` and a protected or combined build
    /// already completed in this definition.
    pub fn build_routes(
        &mut self,
        mode: RoutingMode,
        opts: &RouteOptions,
    ) -> Result<Vec<ResolvedRoute>, RouteOrderingError> {
        if mode.is_deprecated_alias() {
            tracing::warn!(
                "coherence routing mode `private` is deprecated, use `protected` instead"
            );
            self.warnings
                .push("routing mode `private` is deprecated, use `protected`".to_string());
        }

        if mode == RoutingMode::Public && self.protected_built {
            tracing::error!("public coherence routes declared after protected routes");
            return Err(RouteOrderingError);
        }

        let paths = self.default_paths.merged(&opts.custom_routes);
        let routes: Vec<ResolvedRoute> = mode
            .groups()
            .iter()
            .flat_map(|group| table::entries(*group))
            .filter(|entry| self.registry.has_action(entry.capability, entry.action))
            .map(|entry| ResolvedRoute {
                method: entry.method,
                path: paths.resolve(entry.path_key, entry.suffix),
                handler: entry.handler,
                capability: entry.capability,
                action: entry.action,
            })
            .inspect(|route| tracing::debug!(%mode, route = %route, "coherence route emitted"))
            .collect();

        if mode.includes_protected() {
            self.protected_built = true;
        }

        tracing::info!(%mode, count = routes.len(), "coherence routes built");
        Ok(routes)
    }
}
