//! Relay Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! `notify::NotifyError`.

mod settings;

use clap::Parser;
use notify::{CleanupWorker, InMemoryNotificationStore, notify_router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::{Args, REQUEST_TIMEOUT, load_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay=info,notify=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Any configuration problem aborts startup
    let config = Arc::new(load_config(&args.config)?);

    tracing::info!(
        config = %args.config.display(),
        cool_off_secs = config.cool_off.as_secs(),
        "Configuration loaded"
    );

    let store = Arc::new(InMemoryNotificationStore::new());

    let shutdown = CancellationToken::new();
    let cleanup = CleanupWorker::new(store.clone(), &config).spawn(shutdown.clone());

    // Build router
    let app = notify_router(store, config)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", args.addr);

    let listener = TcpListener::bind(args.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the cleanup worker once no request can reach the store anymore
    shutdown.cancel();
    if let Err(e) = cleanup.await {
        tracing::warn!(error = %e, "Cleanup worker did not stop cleanly");
    }

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
