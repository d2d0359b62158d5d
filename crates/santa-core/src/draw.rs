//! From raw roster entries to per-participant reveal records.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  matcher::Matcher,
  participant::{ParticipantEntry, ParticipantId, resolve_roster},
};

/// What one participant is allowed to learn: their own name and whom they
/// give to. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RevealRecord {
  pub name:        String,
  pub assigned_to: String,
}

impl RevealRecord {
  pub fn new(name: impl Into<String>, assigned_to: impl Into<String>) -> Self {
    Self { name: name.into(), assigned_to: assigned_to.into() }
  }
}

/// One giver's outcome: their identity for this draw plus the record they may
/// reveal. Only `record` ever leaves through a reveal reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawn {
  pub id:     ParticipantId,
  pub record: RevealRecord,
}

/// Resolve `entries`, run the matcher, and return one result per entry in
/// input order.
pub fn draw<R: Rng + ?Sized>(
  entries: &[ParticipantEntry],
  matcher: &Matcher,
  rng: &mut R,
) -> Result<Vec<Drawn>> {
  let participants = resolve_roster(entries)?;
  let assignment = matcher.assign(&participants, rng)?;

  let names: HashMap<ParticipantId, &str> =
    participants.iter().map(|p| (p.id, p.name.as_str())).collect();

  // The matcher only pairs ids taken from `participants`.
  Ok(
    assignment
      .iter()
      .map(|pairing| Drawn {
        id:     pairing.giver,
        record: RevealRecord::new(names[&pairing.giver], names[&pairing.recipient]),
      })
      .collect(),
  )
}
