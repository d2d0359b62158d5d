//! `POST /generate` — draw a new assignment and hand out reveal references.
//!
//! Body: `{"participants":[{"name":"Alice","exclusions":["Bob"]}, ...]}`

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use rand::{SeedableRng, rngs::StdRng};
use santa_core::{ParticipantEntry, ParticipantId, draw, store::RevealStore};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError, reveal_url};

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
  #[serde(default)]
  pub participants: Option<Vec<ParticipantEntry>>,
}

/// One participant's slice of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentView {
  pub id:          ParticipantId,
  pub name:        String,
  pub assigned_to: String,
  pub reference:   String,
  pub reveal_url:  String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
  pub assignments: Vec<AssignmentView>,
}

pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError>
where
  S: RevealStore + 'static,
{
  let Json(body) = body?;
  let drawn = draw(
    body.participants.as_deref().unwrap_or_default(),
    &state.matcher,
    &mut StdRng::from_entropy(),
  )
  .inspect_err(|e| tracing::info!(error = %e, "draw rejected"))?;

  // Only the name pair goes into the store; ids stay in this response.
  let references = state
    .store
    .publish(drawn.iter().map(|d| d.record.clone()).collect())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(participants = drawn.len(), "assignment generated");

  let assignments = drawn
    .into_iter()
    .zip(references)
    .map(|(drawn, reference)| AssignmentView {
      id:          drawn.id,
      name:        drawn.record.name,
      assigned_to: drawn.record.assigned_to,
      reveal_url:  reveal_url(&reference),
      reference,
    })
    .collect();
  Ok(Json(GenerateResponse { assignments }))
}
