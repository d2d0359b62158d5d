//! santa-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), overlays
//! `SANTA_*` environment variables, opens the configured reveal store, and
//! serves the JSON API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use santa_core::store::{RevealStore, TokenStore};
use santa_server::{Persistence, ServerConfig};
use santa_store_memory::MemoryStore;
use santa_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Secret Santa draw server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SANTA"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  server_cfg.validate().context("invalid configuration")?;

  match server_cfg.persistence {
    Persistence::Token => serve(Arc::new(TokenStore), &server_cfg).await,
    Persistence::Memory => serve(Arc::new(MemoryStore::new()), &server_cfg).await,
    Persistence::Sqlite => {
      // `validate` guarantees the path is present.
      let path = server_cfg
        .store_path
        .as_deref()
        .map(expand_tilde)
        .context("store_path is required")?;
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      serve(Arc::new(store), &server_cfg).await
    }
  }
}

async fn serve<S>(store: Arc<S>, server_cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: RevealStore + 'static,
{
  let app = santa_server::app(store, server_cfg);
  let address = server_cfg.address();

  tracing::info!(
    persistence = ?server_cfg.persistence,
    max_attempts = server_cfg.max_attempts,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
