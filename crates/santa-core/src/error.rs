//! Error types for `santa-core`.

use thiserror::Error;

use crate::participant::ParticipantId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("at least 3 participants are required (got {found})")]
  InsufficientParticipants { found: usize },

  /// Retry ceiling exhausted, or the exclusions leave someone without a
  /// possible recipient or giver.
  #[error(
    "unable to generate a valid assignment after {attempts} attempts; \
     please check your exclusions"
  )]
  UnsatisfiableConstraints { attempts: usize },

  #[error("participant #{position} has an empty name")]
  EmptyName { position: usize },

  #[error("duplicate participant name: {0:?}")]
  DuplicateName(String),

  #[error("participant {0} appears more than once")]
  DuplicateParticipant(ParticipantId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
