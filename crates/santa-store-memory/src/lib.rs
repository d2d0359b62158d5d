//! In-memory backend for reveal records.
//!
//! Holds exactly one batch: every [`publish`](RevealStore::publish) replaces
//! the previous batch wholesale. Nothing survives a restart.

mod store;

pub use store::{Batch, MemoryStore};
