//! Atelier server: luxury interiors marketplace.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use atelier_core::config::AppConfig;
use atelier_database::memory::MemoryStore;
use atelier_database::{DatabasePool, Stores};
use atelier_service::{ImageGenerator, OpenAiImageGenerator};

/// Command-line options. Everything else comes from configuration.
#[derive(Debug, Parser)]
#[command(name = "atelier-server", version, about = "Atelier marketplace API server")]
struct Args {
    /// Extra configuration file layered over `config/default` and `config/{env}`.
    #[arg(long, env = "ATELIER_CONFIG")]
    config: Option<String>,

    /// Environment overlay name (`config/{env}.toml`).
    #[arg(long, env = "ATELIER_ENV", default_value = "development")]
    env: String,

    /// Serve from the in-memory store instead of PostgreSQL.
    #[arg(long)]
    memory: bool,

    /// Apply pending migrations and exit.
    #[arg(long, conflicts_with = "memory")]
    migrate_only: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_configuration(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(args, config).await {
        tracing::error!(error = %format!("{e:#}"), "Server error");
        std::process::exit(1);
    }
}

/// Load layered configuration. The in-memory mode needs no database URL.
fn load_configuration(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load_unvalidated(&args.env, args.config.as_deref())?;
    if args.memory {
        if config.database.url.trim().is_empty() {
            config.database.url = "memory://".to_string();
        }
        config.database.run_migrations = false;
    }
    config.validate()?;
    Ok(config)
}

/// Initialize tracing. `RUST_LOG` overrides `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(args: Args, config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), env = %args.env, "Starting Atelier");

    // ── Step 1: Stores ───────────────────────────────────────────
    let (stores, database) = if args.memory {
        tracing::warn!("Running over the in-memory store; data is lost on exit");
        (Stores::memory(Arc::new(MemoryStore::new())), None)
    } else {
        let database = DatabasePool::connect(&config.database).await?;
        if config.database.run_migrations || args.migrate_only {
            atelier_database::migration::run_migrations(database.pool()).await?;
        }
        if args.migrate_only {
            tracing::info!("Migrations applied, exiting");
            database.close().await;
            return Ok(());
        }
        (Stores::postgres(database.pool().clone()), Some(database))
    };

    // ── Step 2: Image generation ─────────────────────────────────
    if !config.ai.is_configured() {
        tracing::warn!("ai.api_key is not set; room design generation will return 503");
    }
    let generator: Arc<dyn ImageGenerator> =
        Arc::new(OpenAiImageGenerator::new(config.ai.clone())?);

    // ── Step 3: State and router ─────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = atelier_api::AppState::new(config, stores, generator, database.clone());
    let app = atelier_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(addr = %addr, "Atelier listening");

    // ── Step 4: Serve until signalled ────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown");
    });

    server.await.context("serving HTTP")?;

    if let Some(database) = database {
        if tokio::time::timeout(grace, database.close()).await.is_err() {
            tracing::warn!("Database pool did not close within the grace period");
        }
    }

    tracing::info!("Atelier shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
