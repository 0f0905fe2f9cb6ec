/// SciPlayer Server - device and playlist API
use anyhow::Context;
use clap::{Parser, Subcommand};
use sciplayer_server::{config::ServerConfig, create_router, state::AppState};
use sciplayer_storage::{DeviceStore, SqliteStore};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sciplayer-server")]
#[command(about = "SciPlayer device and playlist API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Database path, overrides the configuration file
        #[arg(long, env = "SCIPLAYER_DB_PATH")]
        db_path: Option<String>,

        /// Listen address, e.g. `:8090` or `127.0.0.1:8090`
        #[arg(long, env = "SCIPLAYER_HTTP_ADDR")]
        addr: Option<String>,
    },
    /// Create the database schema and exit
    InitDb {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Database path, overrides the configuration file
        #[arg(long, env = "SCIPLAYER_DB_PATH")]
        db_path: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sciplayer_server=info,sciplayer_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            db_path,
            addr,
        } => {
            let config = ServerConfig::load(config.as_deref())?.with_overrides(db_path, addr);
            serve(config).await?;
        }
        Commands::InitDb { config, db_path } => {
            let config = ServerConfig::load(config.as_deref())?.with_overrides(db_path, None);
            init_db(&config).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;
    let addr = config.socket_addr()?;

    tracing::info!("Starting SciPlayer Server");
    tracing::info!("Database: {}", config.storage.db_path);

    // Schema failures are fatal here, before any request is served
    let store = SqliteStore::open(&config.storage.db_path)
        .await
        .context("failed to initialize sqlite store")?;
    let store = Arc::new(store);
    tracing::info!("Database ready");

    let app = create_router(AppState::new(store.clone()), config.request_timeout());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(e) = store.close().await {
        tracing::error!("Error closing store: {}", e);
    }

    served.context("server stopped")?;
    tracing::info!("Server stopped");

    Ok(())
}

async fn init_db(config: &ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let store = SqliteStore::open(&config.storage.db_path)
        .await
        .context("failed to initialize sqlite store")?;
    store.close().await?;

    tracing::info!("Schema ready at {}", config.storage.db_path);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
