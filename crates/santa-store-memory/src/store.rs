//! [`MemoryStore`] — the in-process implementation of [`RevealStore`].

use std::{collections::HashMap, convert::Infallible, future::Future, sync::Arc};

use chrono::{DateTime, Utc};
use santa_core::{draw::RevealRecord, store::RevealStore};
use tokio::sync::RwLock;
use uuid::Uuid;

// ─── Batch ───────────────────────────────────────────────────────────────────

/// The records of one draw, keyed by reference.
#[derive(Debug, Clone)]
pub struct Batch {
  pub generated_at: DateTime<Utc>,
  pub records:      HashMap<String, RevealRecord>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A process-local reveal table.
///
/// Cloning is cheap; clones share the same table. Writers take an exclusive
/// lock so two concurrent draws never interleave; the last one wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  batch: Arc<RwLock<Option<Batch>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Replace the live batch with `records`. Nothing is merged.
  pub async fn put(&self, records: HashMap<String, RevealRecord>) {
    let batch = Batch { generated_at: Utc::now(), records };
    let count = batch.records.len();
    *self.batch.write().await = Some(batch);
    tracing::debug!(records = count, "replaced reveal batch");
  }

  pub async fn get(&self, key: &str) -> Option<RevealRecord> {
    self
      .batch
      .read()
      .await
      .as_ref()
      .and_then(|b| b.records.get(key).cloned())
  }

  /// When the live batch was stored, if any.
  pub async fn generated_at(&self) -> Option<DateTime<Utc>> {
    self.batch.read().await.as_ref().map(|b| b.generated_at)
  }

  pub async fn clear(&self) { *self.batch.write().await = None; }
}

impl RevealStore for MemoryStore {
  type Error = Infallible;

  fn publish(
    &self,
    records: Vec<RevealRecord>,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_ {
    async move {
      let keys: Vec<String> =
        records.iter().map(|_| Uuid::new_v4().simple().to_string()).collect();
      self.put(keys.iter().cloned().zip(records).collect()).await;
      Ok(keys)
    }
  }

  fn reveal<'a>(
    &'a self,
    reference: &'a str,
  ) -> impl Future<Output = Result<Option<RevealRecord>, Self::Error>> + Send + 'a {
    async move { Ok(self.get(reference).await) }
  }
}
