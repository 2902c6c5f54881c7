use axum::{Router, http::HeaderName, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Capability registry and the route table builder.
pub mod error;
pub mod models;
pub mod registry;
pub mod routes;

// Service surface around the builder.
pub mod config;
pub mod handlers;

// --- Public Re-exports ---

pub use config::{AppConfig, CoherenceSettings, Env};
pub use error::{ConfigError, RouteOrderingError};
pub use models::{Action, Capability, HttpMethod, ResolvedRoute};
pub use registry::{ActionSet, CapabilityRegistry};
pub use routes::{
    RouteOptions, RouterDefinition, RoutingMode,
    paths::{PathKey, RoutePaths},
};

/// ApiDoc
///
/// Auto-generates the OpenAPI document for the static endpoints. The generated
/// coherence routes are dynamic and are described by `GET /coherence/routes`
/// instead. Served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_routes),
    components(
        schemas(
            models::RouteTableResponse, models::ResolvedRoute, models::Handler,
            models::HttpMethod, models::Capability, models::Action, models::Controller,
            models::PlaceholderResponse,
        )
    ),
    tags(
        (name = "coherence-router", description = "Authentication route table")
    )
)]
struct ApiDoc;

/// MountedRoutes
///
/// Both halves of the route table generated for the application router.
#[derive(Debug, Clone)]
pub struct MountedRoutes {
    pub public: Vec<ResolvedRoute>,
    pub protected: Vec<ResolvedRoute>,
}

/// AppState
///
/// The single immutable container shared across requests: the loaded configuration
/// and the route table generated from it.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub routes: Arc<MountedRoutes>,
}

impl AppState {
    /// new
    ///
    /// Defines the application router's coherence routes: public first, then
    /// protected, in one router definition so the ordering rule is checked here,
    /// at startup.
    pub fn new(config: AppConfig) -> Result<Self, RouteOrderingError> {
        let opts = RouteOptions::default();
        let mut definition =
            RouterDefinition::with_paths(&config.registry, config.default_routes.clone());
        let public = definition.coherence_routes(None, None)?;
        let protected = definition.coherence_routes(Some(RoutingMode::Protected), Some(&opts))?;

        let routes = Arc::new(MountedRoutes { public, protected });
        Ok(Self { config, routes })
    }
}

/// create_router
///
/// Assembles the application's routing structure: documentation, health check,
/// the route-table listing, and the generated coherence routes backed by the
/// placeholder handlers.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "ok" }))
        .route("/coherence/routes", get(handlers::list_routes));

    // Public half first, then protected. Shared paths merge per method.
    let placeholder = handlers::placeholder::<AppState>;
    let base_router = routes::mount(base_router, &state.routes.public, &placeholder);
    let base_router = routes::mount(base_router, &state.routes.protected, &placeholder);

    // 3. Observability and Correlation Layers
    base_router
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Span maker for `TraceLayer`: tags every request span with method, URI and the
/// `x-request-id` assigned by `SetRequestIdLayer`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
