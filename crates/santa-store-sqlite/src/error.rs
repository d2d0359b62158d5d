//! Error type for `santa-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(#[from] chrono::ParseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
