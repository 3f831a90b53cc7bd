//! HTTP server startup and background session sweeping

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use authlab_auth::{SessionStore, UserStore};
use authlab_token::{TokenConfig, TokenService};
use chrono::Utc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::routes::router;
use crate::state::AppState;

/// Server settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Listen address.
    pub addr: SocketAddr,
    /// Cookie session lifetime.
    pub session_ttl: chrono::Duration,
    /// Interval between expired-session sweeps.
    pub sweep_interval: Duration,
}

/// Builds the application state from configuration.
pub fn build_state(config: &TokenConfig, session_ttl: chrono::Duration) -> Result<AppState> {
    let tokens = TokenService::from_config(config).context("invalid token configuration")?;
    Ok(AppState::new(
        tokens,
        UserStore::new(),
        SessionStore::new(session_ttl),
    ))
}

/// Spawns a task that purges expired sessions every `interval`.
pub fn spawn_session_sweeper(sessions: Arc<SessionStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sessions.purge_expired(Utc::now());
        }
    })
}

/// Runs the server until Ctrl-C.
pub async fn serve(config: &TokenConfig, options: ServeOptions) -> Result<()> {
    let state = build_state(config, options.session_ttl)?;
    let sweeper = spawn_session_sweeper(state.sessions().clone(), options.sweep_interval);

    let listener = TcpListener::bind(options.addr)
        .await
        .with_context(|| format!("failed to bind {}", options.addr))?;
    tracing::info!(addr = %options.addr, "authlab server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    sweeper.abort();
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
