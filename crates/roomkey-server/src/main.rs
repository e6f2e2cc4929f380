//! roomkey server binary.
//!
//! Starts an axum HTTP server that hands out LiveKit connection details,
//! with structured logging and graceful shutdown on SIGTERM/SIGINT.

use roomkey_server::{app, config, AppState};
use roomkey_token::TokenService;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("ROOMKEY_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

/// Loads `.env.local` then `.env` into the process environment. Variables
/// already set take precedence over both files.
fn load_dotenv() -> Vec<&'static str> {
    [".env.local", ".env"]
        .into_iter()
        .filter(|name| dotenvy::from_filename(name).is_ok())
        .collect()
}

#[tokio::main]
async fn main() {
    let env_files = load_dotenv();

    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    // Load configuration
    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration — the server cannot start without valid config");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        env_files = ?env_files,
        "resolved startup configuration path"
    );

    // Missing credentials are reported per request; warn early so operators notice.
    if let Err(e) = config.livekit.credentials() {
        tracing::warn!("LiveKit is not fully configured, token requests will fail: {}", e);
    }
    if let Err(e) = config.livekit.participant_identity() {
        tracing::warn!("no participant identity configured, token requests will fail: {}", e);
    }

    let state = AppState::new(TokenService::new(config.livekit.clone()));
    let app = app(state);
    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(%addr, "starting roomkey server");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address — is another process using this port?");

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("roomkey server shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
