//! Participants and roster resolution.
//!
//! Callers submit names with exclusion *names*. Resolution turns those into a
//! list of [`Participant`]s whose exclusions are identities, which is the only
//! shape the matcher accepts.

use std::{
  collections::{HashMap, HashSet},
  fmt,
};

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{Error, Result, matcher::MIN_PARTICIPANTS};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque, stable participant identity. Fresh for every draw.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
  pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for ParticipantId {
  fn default() -> Self { Self::new() }
}

impl fmt::Display for ParticipantId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

// ─── Participant ─────────────────────────────────────────────────────────────

/// A resolved member of the draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
  pub id:         ParticipantId,
  /// Trimmed display name, unique within the draw ignoring case.
  pub name:       String,
  /// Identities this participant must not be assigned to. May contain the
  /// participant's own id or ids outside the draw; both are harmless.
  pub exclusions: HashSet<ParticipantId>,
}

impl Participant {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      id:         ParticipantId::new(),
      name:       name.into(),
      exclusions: HashSet::new(),
    }
  }

  pub fn excluding(mut self, ids: impl IntoIterator<Item = ParticipantId>) -> Self {
    self.exclusions.extend(ids);
    self
  }

  /// Whether `self` may give to `other`.
  pub fn may_give_to(&self, other: ParticipantId) -> bool {
    other != self.id && !self.exclusions.contains(&other)
  }
}

// ─── Raw input ───────────────────────────────────────────────────────────────

/// One row of a Generate request, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantEntry {
  pub name:       String,
  /// Missing and `null` both mean "no exclusions".
  #[serde(default, deserialize_with = "null_as_empty")]
  pub exclusions: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ParticipantEntry {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), exclusions: Vec::new() }
  }

  pub fn excluding<I, N>(mut self, names: I) -> Self
  where
    I: IntoIterator<Item = N>,
    N: Into<String>,
  {
    self.exclusions.extend(names.into_iter().map(Into::into));
    self
  }
}

fn name_key(name: &str) -> String { name.trim().to_lowercase() }

/// Resolve raw entries into participants, preserving input order.
///
/// Exclusion names are matched trimmed and case-insensitively. Names that
/// match nobody are dropped without error.
pub fn resolve_roster(entries: &[ParticipantEntry]) -> Result<Vec<Participant>> {
  if entries.len() < MIN_PARTICIPANTS {
    return Err(Error::InsufficientParticipants { found: entries.len() });
  }

  let mut participants = Vec::with_capacity(entries.len());
  let mut by_name: HashMap<String, ParticipantId> = HashMap::new();

  for (position, entry) in entries.iter().enumerate() {
    let name = entry.name.trim();
    if name.is_empty() {
      return Err(Error::EmptyName { position: position + 1 });
    }
    let participant = Participant::new(name);
    if by_name.insert(name_key(name), participant.id).is_some() {
      return Err(Error::DuplicateName(name.to_string()));
    }
    participants.push(participant);
  }

  for (participant, entry) in participants.iter_mut().zip(entries) {
    for excluded in &entry.exclusions {
      match by_name.get(&name_key(excluded)) {
        Some(id) => {
          participant.exclusions.insert(*id);
        }
        None => {
          tracing::debug!(
            participant = %participant.name,
            exclusion = %excluded,
            "dropping exclusion that names no participant"
          );
        }
      }
    }
  }

  Ok(participants)
}
