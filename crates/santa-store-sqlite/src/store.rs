//! [`SqliteStore`] — the SQLite implementation of [`RevealStore`].

use std::{future::Future, path::Path};

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use santa_core::{draw::RevealRecord, store::RevealStore};
use uuid::Uuid;

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A reveal table backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All writes
/// go through the connection's single worker thread, so batches never
/// interleave.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Replace the stored batch with `batch` inside one transaction.
  pub async fn put_batch(&self, batch: Vec<(String, RevealRecord)>) -> Result<()> {
    let generated_at = Utc::now().to_rfc3339();
    let count = batch.len();
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM reveals", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO reveals (reference, name, assigned_to, generated_at)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for (reference, record) in &batch {
            stmt.execute(rusqlite::params![
              reference,
              record.name,
              record.assigned_to,
              generated_at
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    tracing::debug!(records = count, "replaced reveal batch");
    Ok(())
  }

  /// Fetch one record by reference.
  pub async fn get(&self, reference: &str) -> Result<Option<RevealRecord>> {
    let reference = reference.to_string();
    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT name, assigned_to FROM reveals WHERE reference = ?1",
              rusqlite::params![reference],
              |row| {
                Ok(RevealRecord {
                  name:        row.get(0)?,
                  assigned_to: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(record)
  }

  /// When the live batch was stored, if any.
  pub async fn generated_at(&self) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row("SELECT generated_at FROM reveals LIMIT 1", [], |r| r.get(0))
            .optional()?,
        )
      })
      .await?;
    raw
      .map(|s| DateTime::parse_from_rfc3339(&s).map(|dt| dt.with_timezone(&Utc)))
      .transpose()
      .map_err(Error::from)
  }
}

impl RevealStore for SqliteStore {
  type Error = Error;

  fn publish(
    &self,
    records: Vec<RevealRecord>,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_ {
    async move {
      let batch: Vec<(String, RevealRecord)> = records
        .into_iter()
        .map(|r| (Uuid::new_v4().simple().to_string(), r))
        .collect();
      let keys = batch.iter().map(|(k, _)| k.clone()).collect();
      self.put_batch(batch).await?;
      Ok(keys)
    }
  }

  fn reveal<'a>(
    &'a self,
    reference: &'a str,
  ) -> impl Future<Output = Result<Option<RevealRecord>, Self::Error>> + Send + 'a {
    self.get(reference)
  }
}
