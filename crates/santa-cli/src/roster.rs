//! TOML roster files.
//!
//! ```toml
//! [[participant]]
//! name = "Alice"
//! exclusions = ["Bob"]
//!
//! [[participant]]
//! name = "Bob"
//! ```

use santa_core::ParticipantEntry;
use serde::Deserialize;

#[derive(Deserialize)]
struct RosterFile {
  #[serde(default, rename = "participant")]
  participants: Vec<ParticipantEntry>,
}

pub fn parse(raw: &str) -> Result<Vec<ParticipantEntry>, toml::de::Error> {
  Ok(toml::from_str::<RosterFile>(raw)?.participants)
}
