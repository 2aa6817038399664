//! staffbook-server - departments and employees REST service
//!
//! Startup order: arguments, config file, tracing, database, listener.

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::ServiceExt;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use staffbook_common::config::{
    locate_config_file, read_toml_config, DatabaseLocation, Settings, TomlConfig,
};
use staffbook_common::db::{init_database, init_memory_database, seed};
use staffbook_server::cli::Cli;
use staffbook_server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Read before tracing exists so the configured level can be used; the
    // outcome is logged once the subscriber is up
    let config_file = locate_config_file(cli.config.as_deref());
    let loaded = config_file.as_deref().map(read_toml_config);
    let toml_config = match &loaded {
        Some(Ok(config)) => config.clone(),
        _ => TomlConfig::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "staffbook_server={level},staffbook_common={level},tower_http={level}",
                    level = toml_config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting staffbook-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match (&config_file, &loaded) {
        (Some(path), Some(Ok(_))) => info!("Loaded config from {}", path.display()),
        (Some(path), Some(Err(e))) => {
            warn!("Ignoring config file {}: {}; using defaults", path.display(), e)
        }
        _ => info!("No config file found, using defaults"),
    }

    let settings = Settings::resolve(&cli.overrides(), &toml_config);

    let pool = match &settings.database {
        DatabaseLocation::File(path) => {
            info!("Database path: {}", path.display());
            init_database(path).await
        }
        DatabaseLocation::Memory => {
            info!("Test mode: using in-memory database");
            init_memory_database().await
        }
    }
    .context("Failed to initialize database")?;

    if cli.seed {
        match seed::populate(&pool).await {
            Ok(()) => info!("Inserted sample departments and employees"),
            Err(e) => error!("Sample data not inserted: {}", e),
        }
    }

    let app = build_router(AppState::new(pool.clone()));

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("staffbook-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
