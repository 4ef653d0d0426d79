use std::path::PathBuf;

use clap::Parser;
use fcs_app::{AppConfig, AppResult, StorageConfig, seed_if_empty};
use fcs_server::{AppState, router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fcs-server")]
#[command(about = "REST API for fuel-cell backup power sizing", long_about = None)]
#[command(version)]
struct Cli {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (host:port), overrides FCS_BIND
    #[arg(long)]
    bind: Option<String>,

    /// Persist to JSON documents under this directory, overrides FCS_DATA_DIR
    #[arg(long, conflicts_with = "memory")]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory
    #[arg(long)]
    memory: bool,

    /// Do not load the built-in catalog into an empty store
    #[arg(long)]
    no_seed: bool,
}

fn resolve_config(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_process_env();

    if let Some(bind) = &cli.bind {
        config.bind = bind.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.storage = StorageConfig::File {
            data_dir: dir.clone(),
        };
    }
    if cli.memory {
        config.storage = StorageConfig::Memory;
    }
    if cli.no_seed {
        config.seed_catalog = false;
    }

    config.validate()?;
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let store = config.open_store()?;
    if config.seed_catalog {
        seed_if_empty(store.as_ref())?;
    }

    let addr = config.bind_addr()?;
    let app = router(AppState::new(store.clone(), config.defaults.clone()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, storage = store.backend(), "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
