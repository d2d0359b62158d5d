//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Draw(#[from] santa_core::Error),

  /// The request body is not a well-formed Generate request.
  #[error("invalid request body: {0}")]
  BadRequest(String),

  /// The reveal reference is malformed, unknown, or stale.
  #[error("assignment not found")]
  InvalidReference,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use santa_core::Error as Draw;

    let status = match &self {
      ApiError::Draw(Draw::UnsatisfiableConstraints { .. }) => {
        StatusCode::UNPROCESSABLE_ENTITY
      }
      ApiError::Draw(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::InvalidReference => StatusCode::NOT_FOUND,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}
