use std::net::IpAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use daily_persistence::connection::connect_and_migrate;
use daily_persistence::{ProgressRepository, ResultRepository, StatsRepository};
use daily_server::{auth::AuthService, config::Config, create_routes};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Daily Word server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let host: IpAddr = match config.host.parse() {
        Ok(host) => host,
        Err(e) => {
            tracing::error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let auth_service = match (&config.jwt_secret, config.auth_dev_mode) {
        (_, true) => {
            info!("Starting in development authentication mode - token signatures not checked");
            Arc::new(AuthService::new_dev_mode())
        }
        (Some(secret), false) => Arc::new(AuthService::new(secret)),
        (None, false) => {
            tracing::error!("JWT_SECRET is required outside dev mode");
            std::process::exit(1);
        }
    };

    let routes = create_routes(
        auth_service,
        Arc::new(ProgressRepository::new(db.clone())),
        Arc::new(StatsRepository::new(db.clone())),
        Arc::new(ResultRepository::new(db)),
        config.max_body_bytes,
    );

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) =
        warp::serve(routes).bind_with_graceful_shutdown((host, config.port), shutdown_signal());

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}

async fn shutdown_signal() {
    // Wait for SIGINT (Ctrl+C) or SIGTERM
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal as unix_signal};

        match (
            unix_signal(SignalKind::interrupt()),
            unix_signal(SignalKind::terminate()),
        ) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => {
                        info!("Received SIGINT, shutting down gracefully...");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down gracefully...");
                    }
                }
                return;
            }
            _ => tracing::warn!("Failed to install signal handlers, falling back to Ctrl+C"),
        }
    }

    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    info!("Received Ctrl+C, shutting down gracefully...");
}
