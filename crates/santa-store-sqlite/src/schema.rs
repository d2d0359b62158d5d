//! SQL schema for the reveal store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Holds exactly one batch. Publishing deletes every row before inserting.
CREATE TABLE IF NOT EXISTS reveals (
    reference    TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    assigned_to  TEXT NOT NULL,
    generated_at TEXT NOT NULL   -- RFC 3339 UTC; shared by the whole batch
);
";
