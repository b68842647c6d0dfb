//! Entry point for the `jug-gateway` HTTP server.

use std::sync::Arc;

use axum::{extract::Request, ServiceExt};
use chrono::Utc;
use jug_gateway::{
    config::{load_dotenv, GatewayConfig},
    routes::{create_app, SharedService},
    service::SolverService,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "jug_gateway=info,tower_http=info";

#[tokio::main]
async fn main() {
    // Read `.env` before the subscriber so RUST_LOG can come from it.
    let dotenv = load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match dotenv {
        Ok(true) => info!("loaded environment from .env"),
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "failed to load .env");
            std::process::exit(1);
        }
    }

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to init config");
            std::process::exit(1);
        }
    };

    let service: SharedService = Arc::new(SolverService::new());
    let app = create_app(service, &config);
    let addr = config.listen_addr();

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %addr,
        started_at = %Utc::now().to_rfc3339(),
        static_dir = %config.static_dir.display(),
        "jug-gateway listening"
    );

    if let Err(e) = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        std::process::exit(1);
    }

    info!("jug-gateway stopped");
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
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
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
