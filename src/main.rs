//! CodeJudge - Application Entry Point
//!
//! This is the main entry point for the CodeJudge server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use bollard::Docker;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codejudge::{
    config::CONFIG,
    constants::API_BASE_PATH,
    handlers,
    judge::{DockerSandbox, JudgeEngine},
    state::AppState,
    store::{InMemoryProblemStore, InMemorySubmissionStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CodeJudge server...");

    // Initialize Docker client
    tracing::info!("Connecting to Docker...");
    let docker = Docker::connect_with_socket_defaults()?;

    // Verify Docker connection
    let docker_info = docker.version().await?;
    tracing::info!(
        "Connected to Docker version: {}",
        docker_info.version.unwrap_or_default()
    );

    // Initialize stores
    let problems = Arc::new(InMemoryProblemStore::new());
    if let Some(path) = &CONFIG.engine.problems_path {
        let loaded = problems.load_dir(path)?;
        tracing::info!("Loaded {} problem(s) from {}", loaded, path.display());
    }
    let submissions = Arc::new(InMemorySubmissionStore::new());

    // Start the judging engine
    let sandbox = Arc::new(DockerSandbox::new(docker));
    let engine = JudgeEngine::start(sandbox, problems, submissions, CONFIG.engine.clone());

    // Create application state
    let state = AppState::new(engine, CONFIG.clone());

    // Build the router
    let app = Router::new()
        .nest(API_BASE_PATH, handlers::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
