mod config;
mod error;
mod health;
mod info;
mod system;

use std::env;
use std::net::SocketAddr;
use std::time::Instant;

use anyhow::Result;
use axum::Router;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

/// Shared handler state. `started_at` is captured once, before the listener
/// accepts connections, and is read-only afterwards.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    pub started_at: Instant,
}

/// Assembles the application router. Handlers are infallible: every request
/// resolves to a JSON response, and delivery is best-effort once the body has
/// been produced.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(info::router())
        .merge(health::router())
        .fallback(error::not_found)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

#[tokio::main]
async fn start() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    // Load environment variables (with hardcoded fallbacks)
    let server_config = ServerConfig::from_env();

    // Capture the start instant before the listener comes up
    let state = AppState {
        started_at: Instant::now(),
    };

    // Initialize router
    let app = app(state);

    // Start server
    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting DevOps Info Service on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received termination signal shutting down");
}

pub fn main() {
    let result = start();
    if let Err(err) = result {
        error!("Error: {err}");
        std::process::exit(1);
    }
}
