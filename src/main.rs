use coherence_router::{AppConfig, AppState, Env, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: loads configuration, initializes logging, generates the coherence
/// route table, and serves it.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load().expect("FATAL: invalid coherence configuration");

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise debug for this crate so every emitted route is logged.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coherence_router=debug,tower_http=info".into());

    // 3. Pretty output locally, JSON in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Route Table Generation
    // A misordered router definition aborts startup here, never at request time.
    let bind_addr = config.bind_addr;
    let app_state = AppState::new(config).expect("FATAL: invalid coherence router definition");
    tracing::info!(
        public = app_state.routes.public.len(),
        protected = app_state.routes.protected.len(),
        "Coherence route table generated"
    );

    // 5. Router and Server Startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .expect("FATAL: failed to bind listener");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("Route table available at: http://{}/coherence/routes", bind_addr);

    axum::serve(listener, app).await.expect("FATAL: server error");
}
