//! Async HTTP client wrapping the santa JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, StatusCode};
use santa_api::{generate::GenerateResponse, reveal::RevealView};
use santa_core::ParticipantEntry;
use serde::Deserialize;
use serde_json::json;

/// Async HTTP client for the santa JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }

  async fn error_of(resp: reqwest::Response) -> anyhow::Error {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
      Ok(body) => anyhow!("{} ({status})", body.error),
      Err(_) => anyhow!("server returned {status}"),
    }
  }

  /// `POST /generate`
  pub async fn generate(&self, participants: &[ParticipantEntry]) -> Result<GenerateResponse> {
    let resp = self
      .client
      .post(self.url("/generate"))
      .json(&json!({ "participants": participants }))
      .send()
      .await
      .context("POST /generate failed")?;

    if !resp.status().is_success() {
      return Err(Self::error_of(resp).await);
    }
    resp.json().await.context("deserialising assignments")
  }

  /// `GET /reveal/{reference}`; `None` when the server does not know it.
  pub async fn reveal(&self, reference: &str) -> Result<Option<RevealView>> {
    let resp = self
      .client
      .get(self.url(&santa_api::reveal_url(reference)))
      .send()
      .await
      .context("GET /reveal failed")?;

    match resp.status() {
      StatusCode::NOT_FOUND => Ok(None),
      s if s.is_success() => resp.json().await.map(Some).context("deserialising reveal"),
      _ => Err(Self::error_of(resp).await),
    }
  }
}
