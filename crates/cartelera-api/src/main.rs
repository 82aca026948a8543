//! cartelera server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), loads the
//! bundled seed dataset into an in-memory store, and serves the movie API
//! over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use cartelera_api::{AppState, ServerConfig, cors::CorsPolicy};
use cartelera_store_memory::MemoryStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Cartelera movie API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration. Both the file and every field are optional.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CARTELERA"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = MemoryStore::seeded().context("failed to load the seed dataset")?;
  tracing::info!(movies = store.len().await, "seeded in-memory store");

  let state = AppState {
    store: Arc::new(store),
    cors:  Arc::new(CorsPolicy::new(server_cfg.allowed_origins.clone())),
  };

  let app = cartelera_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
