//! `GET /reveal/{reference}` — show one participant their own pairing.

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use santa_core::store::RevealStore;
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError, reveal_url};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealView {
  pub name:        String,
  pub assigned_to: String,
  pub reveal_url:  String,
}

pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  reference: Result<Path<String>, PathRejection>,
) -> Result<Json<RevealView>, ApiError>
where
  S: RevealStore + 'static,
{
  // A reference that does not even decode to UTF-8 is just another unknown one.
  let Path(reference) = reference.map_err(|e| {
    tracing::debug!(error = %e, "unreadable reveal reference");
    ApiError::InvalidReference
  })?;

  let record = state
    .store
    .reveal(&reference)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      tracing::debug!("reveal reference not found");
      ApiError::InvalidReference
    })?;

  Ok(Json(RevealView {
    name:        record.name,
    assigned_to: record.assigned_to,
    reveal_url:  reveal_url(&reference),
  }))
}
