//! Latchkey Auth API
//!
//! Invite-gated credential and session authority. Run `auth-api bootstrap
//! --admin <identity>` once to create the data file, then `auth-api serve`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use auth_api::bootstrap::BootstrapError;
use auth_api::telemetry::{init_tracing, setup_metrics};
use auth_api::{build_router, AppState, Config};
use clap::{Parser, Subcommand};
use latchkey_auth_core::{Argon2Hasher, AuthStore, OsTokenSource};
use latchkey_db::{DbError, FileSnapshotRepository, SnapshotRepository};
use tokio::signal;

#[derive(Debug, Parser)]
#[command(name = "auth-api", version, about = "Invite-gated credential and session authority")]
struct Cli {
    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Serve the command API (default)
    Serve,

    /// Create the data file with an administrator and print a first invite code
    Bootstrap {
        /// Identity that will hold administrator rights
        #[arg(long)]
        admin: String,

        /// Snapshot document to create
        #[arg(long, env = "DATA_FILE")]
        data_file: PathBuf,

        /// Replace an existing data file, discarding all accounts
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    init_tracing()?;

    match cli.command.unwrap_or(Cmd::Serve) {
        Cmd::Serve => serve().await,
        Cmd::Bootstrap {
            admin,
            data_file,
            force,
        } => bootstrap(admin, data_file, force).await,
    }
}

async fn serve() -> anyhow::Result<()> {
    tracing::info!("Starting Latchkey Auth API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        data_file = %config.data_file.display(),
        "Configuration loaded"
    );

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Restore state before accepting any request
    let repo = FileSnapshotRepository::new(&config.data_file);
    let snapshot = repo
        .load()
        .await
        .with_context(|| format!("failed to load {}", config.data_file.display()))?
        .with_context(|| {
            format!(
                "{} does not exist; run `auth-api bootstrap --admin <identity>` first",
                config.data_file.display()
            )
        })?;
    if snapshot.admin.is_none() {
        tracing::warn!("No administrator designated; invite codes cannot be issued");
    }

    let hasher = Argon2Hasher::new(config.auth.hash)?;
    let tokens = OsTokenSource::from_config(&config.auth);
    let store = AuthStore::from_snapshot(snapshot, hasher, tokens);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(store, Arc::new(repo), config);
    let app = build_router(state, metrics_handle);

    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn bootstrap(admin: String, data_file: PathBuf, force: bool) -> anyhow::Result<()> {
    let repo = FileSnapshotRepository::new(&data_file);
    let code = auth_api::bootstrap::bootstrap(&repo, &OsTokenSource::default(), &admin, force)
        .await
        .map_err(|e| match e {
            BootstrapError::Db(DbError::AlreadyExists(path)) => {
                anyhow::anyhow!("{path} already exists; pass --force to replace it")
            }
            BootstrapError::Db(other) => {
                anyhow::Error::new(other).context("failed to write bootstrap snapshot")
            }
            invalid @ BootstrapError::InvalidAdmin(_) => anyhow::Error::new(invalid),
        })?;

    tracing::info!(admin = %admin, data_file = %data_file.display(), "Bootstrap snapshot written");
    println!("{}", code.as_str());
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
