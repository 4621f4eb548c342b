//! Pool Cache - a question-pool cache server for exam platforms
//!
//! Serves randomized question pools with TTL expiry, usage-weighted eviction
//! and per-user attempt deduplication.

mod api;
mod attempts;
mod config;
mod error;
mod models;
mod pool;
mod service;
mod source;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use service::PoolService;
use source::{InMemoryQuestionSource, QuestionSource};
use tasks::spawn_cleanup_task;

/// Main entry point for the pool cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the question source (JSON bank file or built-in demo bank)
/// 4. Construct the pool service with configured parameters
/// 5. Start background expiry sweep task
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pool_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pool Cache Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max_pools={}, pool_ttl={}s, max_attempts={}, port={}, \
         cleanup_interval={}s, eviction_policy={}, dedup_policy={}",
        config.max_pools,
        config.pool_ttl,
        config.max_attempts,
        config.server_port,
        config.cleanup_interval,
        config.eviction_policy.as_str(),
        config.dedup_policy.as_str()
    );

    // Build the question source
    let source: Arc<dyn QuestionSource> = match &config.question_bank_path {
        Some(path) => {
            let bank = InMemoryQuestionSource::from_json_file(path)
                .with_context(|| format!("loading question bank from {}", path))?;
            info!("Question bank loaded from {} ({} questions)", path, bank.len());
            Arc::new(bank)
        }
        None => {
            let bank = InMemoryQuestionSource::demo_bank();
            info!("Using built-in demo bank ({} questions)", bank.len());
            Arc::new(bank)
        }
    };

    // Construct the engine and application state
    let service = PoolService::from_config(&config, source);
    let cleanup_store = service.store();
    let state = AppState::new(service);
    info!("Pool service initialized");

    // Start background expiry sweep
    let cleanup_handle = spawn_cleanup_task(cleanup_store, config.cleanup_interval);
    info!("Background expiry sweep started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the sweep task
    cleanup_handle.abort();
    warn!("Expiry sweep task aborted");
}
