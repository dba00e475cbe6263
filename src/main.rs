// ABOUTME: Entry point for the tabulad binary.
// ABOUTME: Parses CLI arguments, initializes tracing, opens the stores, and serves HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tabula_server::{AppState, TabuladConfig, create_router};

/// Record-keeping backend: JSON records over HTTP, mirrored to xlsx.
#[derive(Debug, Parser)]
#[command(name = "tabulad", version)]
struct Cli {
    /// Data directory (overrides TABULAD_HOME).
    #[arg(long)]
    home: Option<PathBuf>,

    /// Socket address to bind (overrides TABULAD_BIND).
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabulad=debug,tower_http=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = TabuladConfig::from_env().context("loading configuration")?;
    if let Some(home) = cli.home {
        config.home = home;
    }
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let state = AppState::open(&config.home)
        .with_context(|| format!("opening stores in {}", config.home.display()))?;
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    tracing::info!("tabulad listening on {}", config.bind);

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
