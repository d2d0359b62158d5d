//! Constrained random assignment by rejection sampling.
//!
//! Each attempt draws a uniformly random permutation of the participant ids
//! and pairs the i-th participant with the i-th id of the permutation. The
//! first candidate that respects every constraint wins, so the result is a
//! uniform sample over all valid assignments.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::{
  Error, Result,
  participant::{Participant, ParticipantId},
};

/// Smallest group the draw supports.
pub const MIN_PARTICIPANTS: usize = 3;

/// Retry ceiling used by [`Matcher::default`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

// ─── Shuffle ─────────────────────────────────────────────────────────────────

/// Fisher–Yates shuffle; every ordering is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
  for i in (1..items.len()).rev() {
    let j = rng.gen_range(0..=i);
    items.swap(i, j);
  }
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// One giver → recipient edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
  pub giver:     ParticipantId,
  pub recipient: ParticipantId,
}

/// A complete, valid assignment: a bijection over the participants with no
/// fixed points and no excluded edges. Pairings follow input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
  pairings: Vec<Pairing>,
}

impl Assignment {
  pub fn pairings(&self) -> &[Pairing] { &self.pairings }

  pub fn iter(&self) -> impl Iterator<Item = &Pairing> { self.pairings.iter() }

  pub fn len(&self) -> usize { self.pairings.len() }

  pub fn is_empty(&self) -> bool { self.pairings.is_empty() }

  pub fn recipient_of(&self, giver: ParticipantId) -> Option<ParticipantId> {
    self
      .pairings
      .iter()
      .find(|p| p.giver == giver)
      .map(|p| p.recipient)
  }

  pub fn into_map(self) -> HashMap<ParticipantId, ParticipantId> {
    self
      .pairings
      .into_iter()
      .map(|p| (p.giver, p.recipient))
      .collect()
  }
}

// ─── Matcher ─────────────────────────────────────────────────────────────────

/// Stateless assignment generator. Safe to share between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
  /// Number of candidate permutations tried before giving up.
  pub max_attempts: usize,
}

impl Default for Matcher {
  fn default() -> Self { Self { max_attempts: DEFAULT_MAX_ATTEMPTS } }
}

impl Matcher {
  pub fn new(max_attempts: usize) -> Self { Self { max_attempts } }

  /// Draw an assignment for `participants`.
  ///
  /// Fails with [`Error::InsufficientParticipants`] before sampling when
  /// fewer than [`MIN_PARTICIPANTS`] are given, and with
  /// [`Error::UnsatisfiableConstraints`] when no valid candidate turns up
  /// within the retry ceiling.
  pub fn assign<R: Rng + ?Sized>(
    &self,
    participants: &[Participant],
    rng: &mut R,
  ) -> Result<Assignment> {
    if participants.len() < MIN_PARTICIPANTS {
      return Err(Error::InsufficientParticipants { found: participants.len() });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
      if !seen.insert(p.id) {
        return Err(Error::DuplicateParticipant(p.id));
      }
    }

    if let Some(stuck) = first_dead_end(participants) {
      tracing::debug!(participant = %stuck, "exclusions leave no possible pairing");
      return Err(Error::UnsatisfiableConstraints { attempts: 0 });
    }

    let mut candidate: Vec<ParticipantId> = participants.iter().map(|p| p.id).collect();
    for attempt in 1..=self.max_attempts {
      shuffle(&mut candidate, rng);
      if is_valid(participants, &candidate) {
        tracing::debug!(attempt, participants = participants.len(), "assignment found");
        let pairings = participants
          .iter()
          .zip(&candidate)
          .map(|(giver, &recipient)| Pairing { giver: giver.id, recipient })
          .collect();
        return Ok(Assignment { pairings });
      }
    }

    tracing::warn!(
      attempts = self.max_attempts,
      participants = participants.len(),
      "retry ceiling exhausted"
    );
    Err(Error::UnsatisfiableConstraints { attempts: self.max_attempts })
  }
}

/// Validate a candidate in one pass, rejecting on the first violation.
fn is_valid(participants: &[Participant], candidate: &[ParticipantId]) -> bool {
  if candidate.len() != participants.len() {
    return false;
  }
  let mut targets = HashSet::with_capacity(candidate.len());
  participants
    .iter()
    .zip(candidate)
    .all(|(giver, &recipient)| giver.may_give_to(recipient) && targets.insert(recipient))
}

/// A participant that can give to nobody, or that nobody can give to, makes
/// every permutation invalid.
fn first_dead_end(participants: &[Participant]) -> Option<ParticipantId> {
  participants
    .iter()
    .find(|giver| !participants.iter().any(|r| giver.may_give_to(r.id)))
    .or_else(|| {
      participants
        .iter()
        .find(|recipient| !participants.iter().any(|g| g.may_give_to(recipient.id)))
    })
    .map(|p| p.id)
}
