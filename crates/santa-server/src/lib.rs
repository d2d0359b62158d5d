//! HTTP server wiring for the Secret Santa API.
//!
//! Owns configuration and picks the reveal backend; the routes themselves
//! live in `santa-api`.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use santa_core::{matcher::{DEFAULT_MAX_ATTEMPTS, Matcher}, store::RevealStore};
use serde::Deserialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Where reveal records live between Generate and Reveal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
  /// Self-contained tokens; no server-side state.
  #[default]
  Token,
  /// Process-local table, lost on restart.
  Memory,
  /// SQLite file at `store_path`.
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `SANTA_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  #[serde(default)]
  pub persistence:  Persistence,
  pub store_path:   Option<PathBuf>,
  #[serde(default = "default_max_attempts")]
  pub max_attempts: usize,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_max_attempts() -> usize { DEFAULT_MAX_ATTEMPTS }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         default_host(),
      port:         default_port(),
      persistence:  Persistence::default(),
      store_path:   None,
      max_attempts: default_max_attempts(),
    }
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("max_attempts must be at least 1")]
  ZeroAttempts,
  #[error("persistence = \"sqlite\" requires store_path")]
  MissingStorePath,
}

impl ServerConfig {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.max_attempts == 0 {
      return Err(ConfigError::ZeroAttempts);
    }
    if self.persistence == Persistence::Sqlite && self.store_path.is_none() {
      return Err(ConfigError::MissingStorePath);
    }
    Ok(())
  }

  pub fn matcher(&self) -> Matcher { Matcher::new(self.max_attempts) }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`, with request tracing.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: RevealStore + 'static,
{
  santa_api::api_router(store, config.matcher()).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use config::{Config, File, FileFormat};
  use santa_core::store::TokenStore;
  use tower::ServiceExt as _;

  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    Config::builder()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = parse("");
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.persistence, Persistence::Token);
    assert_eq!(cfg.max_attempts, 1000);
    assert_eq!(cfg.validate(), Ok(()));
  }

  #[test]
  fn sqlite_requires_a_path() {
    let cfg = parse("persistence = \"sqlite\"");
    assert_eq!(cfg.validate(), Err(ConfigError::MissingStorePath));

    let cfg = parse("persistence = \"sqlite\"\nstore_path = \"/tmp/santa.db\"");
    assert_eq!(cfg.validate(), Ok(()));
  }

  #[test]
  fn zero_attempts_is_rejected() {
    let cfg = parse("max_attempts = 0");
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroAttempts));
  }

  #[test]
  fn matcher_uses_configured_ceiling() {
    let cfg = parse("max_attempts = 50\npersistence = \"memory\"");
    assert_eq!(cfg.matcher(), Matcher::new(50));
    assert_eq!(cfg.persistence, Persistence::Memory);
  }

  #[tokio::test]
  async fn app_serves_generate() {
    let body = serde_json::json!({
      "participants": [{ "name": "A" }, { "name": "B" }, { "name": "C" }]
    });
    let req = Request::builder()
      .method("POST")
      .uri("/generate")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();
    let resp = app(Arc::new(TokenStore), &ServerConfig::default())
      .oneshot(req)
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
