//! JSON API for the Secret Santa draw.
//!
//! Exposes an axum [`Router`] backed by any [`santa_core::store::RevealStore`].
//! TLS, request tracing, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", santa_api::api_router(store.clone(), Matcher::default()))
//! ```

pub mod error;
pub mod generate;
pub mod reveal;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use santa_core::{matcher::Matcher, store::RevealStore};

pub use error::ApiError;

/// Shared state threaded through the handlers.
pub struct ApiState<S> {
  pub store:   Arc<S>,
  pub matcher: Matcher,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), matcher: self.matcher }
  }
}

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, matcher: Matcher) -> Router<()>
where
  S: RevealStore + 'static,
{
  Router::new()
    .route("/generate", post(generate::handler::<S>))
    .route("/reveal/{reference}", get(reveal::handler::<S>))
    .with_state(ApiState { store, matcher })
}

/// Path under which a reference can be revealed.
pub fn reveal_url(reference: &str) -> String { format!("/reveal/{reference}") }

#[cfg(test)]
mod tests;
