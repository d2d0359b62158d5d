//! The `RevealStore` trait and the stateless [`TokenStore`].
//!
//! A store turns a freshly drawn batch of [`RevealRecord`]s into opaque
//! references and later resolves a reference back to its single record.
//! Stateful backends live in their own crates (`santa-store-memory`,
//! `santa-store-sqlite`); the HTTP layer depends only on this trait.

use std::{convert::Infallible, future::Future};

use crate::{codec, draw::RevealRecord};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over where reveal records live.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RevealStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Make `records` reachable and return one reference per record, in the
  /// same order.
  ///
  /// Stateful stores replace any previously published batch in full; only
  /// the latest draw is ever reachable.
  fn publish(
    &self,
    records: Vec<RevealRecord>,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Look up a reference. Unknown, stale, or malformed references resolve
  /// to `None`; they are never an error.
  fn reveal<'a>(
    &'a self,
    reference: &'a str,
  ) -> impl Future<Output = Result<Option<RevealRecord>, Self::Error>> + Send + 'a;
}

// ─── Stateless implementation ────────────────────────────────────────────────

/// References are self-contained tokens; nothing is kept server-side.
///
/// Safe to run behind any number of processes since there is no shared state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenStore;

impl RevealStore for TokenStore {
  type Error = Infallible;

  fn publish(
    &self,
    records: Vec<RevealRecord>,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_ {
    async move { Ok(records.iter().map(codec::encode).collect()) }
  }

  fn reveal<'a>(
    &'a self,
    reference: &'a str,
  ) -> impl Future<Output = Result<Option<RevealRecord>, Self::Error>> + Send + 'a {
    async move { Ok(codec::decode(reference)) }
  }
}
