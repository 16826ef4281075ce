use anyhow::{Context, Result};
use clap::Parser;
use opentok_rooms::config::DirectoryBackend;
use opentok_rooms::{create_router, AppState, Config, DirectoryStore, FileStore, MemoryStore};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "opentok-rooms", version, about = "Room-to-session directory and token server")]
struct Args {
    /// Config file path (extension optional)
    #[arg(short, long, default_value = "config/opentok-rooms")]
    config: String,

    /// Override the configured HTTP port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Project API key: {}", cfg.credentials.api_key);

    let store: Arc<dyn DirectoryStore> = match cfg.directory.backend {
        DirectoryBackend::Memory => {
            warn!("Room directory is in memory; rooms are forgotten on restart");
            Arc::new(MemoryStore::new())
        }
        DirectoryBackend::File => Arc::new(
            FileStore::open(&cfg.directory.path)
                .await
                .context("Failed to open room directory")?,
        ),
    };

    let state = AppState::from_config(&cfg, store)?;
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
