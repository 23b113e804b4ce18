//! Projects Server - Main Entry Point

use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use projects_server::*;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = Arc::new(Config::from_env().context("Failed to load configuration")?);

    // 2. Initialize logging and tracing
    logging::init(&config).context("Failed to initialize logging")?;

    // 3. Banner and configuration
    logging::print_banner(&config);
    logging::log_config(&config);

    // 4. Start HTTP server
    let (http_shutdown_tx, http_shutdown_rx) = mpsc::channel::<()>(1);

    info!("🌐 Starting HTTP server on {}...", config.http_bind);
    let config_http = config.clone();
    let mut http_handle = tokio::spawn(async move {
        http_server::run_server(config_http, http_shutdown_rx).await
    });
    logging::log_status("🌐", "HTTP Server", "LISTENING", true);

    // 5. Wait for shutdown signal, or for the server to stop on its own
    tokio::select! {
        _ = shutdown_signal() => {
            println!("\n{}", "⚠️  Received shutdown signal, stopping...".bright_yellow());
        }
        result = &mut http_handle => {
            logging::log_status("🌐", "HTTP Server", "FAILED", false);
            return result
                .context("HTTP server task panicked")?
                .context("HTTP server failed");
        }
    }

    // 6. Graceful shutdown
    let _ = http_shutdown_tx.send(()).await;

    match tokio::time::timeout(config.shutdown_timeout, http_handle).await {
        Ok(Ok(Ok(()))) => logging::log_status("🌐", "HTTP Server", "STOPPED", true),
        Ok(Ok(Err(e))) => tracing::error!("❌ HTTP server failed: {}", e),
        Ok(Err(e)) => tracing::error!("❌ HTTP server task panicked: {}", e),
        Err(_) => tracing::warn!("⚠️  HTTP server shutdown timeout"),
    }

    println!("\n{}", "👋 Projects Server stopped cleanly".bright_green().bold());

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }
}
