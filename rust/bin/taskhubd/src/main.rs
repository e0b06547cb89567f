//! `taskhubd`: the task board server binary.
//!
//! Usage:
//!   taskhubd [-c <config.toml>] [--listen <addr>]
//!
//! Configuration is layered: built-in defaults, then the TOML file, then
//! environment variables (a `.env` file is honoured).

mod bootstrap;
mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use taskhub_kv::{KVStore, RedbStore};

use config::ServerConfig;

/// Task board server.
#[derive(Parser, Debug)]
#[command(name = "taskhubd", about = "Task board server")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Listen address (overrides config and environment).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut server_config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        server_config.listen = listen;
    }
    bootstrap::verify_config(&server_config)?;

    // Initialize storage.
    std::fs::create_dir_all(&server_config.storage.data_dir)?;
    let db_path = server_config.db_path();
    let kv: Arc<dyn KVStore> = Arc::new(
        RedbStore::open(&db_path)
            .map_err(|e| anyhow::anyhow!("failed to open store {}: {}", db_path.display(), e))?,
    );
    info!("Document store at {}", db_path.display());

    let auth_module = auth::AuthModule::new(Arc::clone(&kv), server_config.auth_config());
    let board_module = board::BoardModule::new(Arc::clone(&kv), auth_module.authenticator());

    if server_config.seed.enabled {
        match bootstrap::seed(auth_module.service(), board_module.service()).await {
            Ok(true) => info!("Seeded demo data"),
            Ok(false) => info!("Users exist; skipping seed"),
            Err(e) => warn!("Seeding failed, continuing without demo data: {e:#}"),
        }
    }

    let app = routes::build_router(
        &[&auth_module, &board_module],
        routes::cors_layer(&server_config.cors.allowed_origins),
    );

    let listener = tokio::net::TcpListener::bind(&server_config.listen).await?;
    info!("taskhubd listening on {}", server_config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("taskhubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {e}");
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
    info!("Shutdown signal received");
}
