//! Core types and the assignment engine for the Secret Santa draw.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! matcher is a pure function of its input and an injected RNG; reveal
//! persistence is expressed through the [`store::RevealStore`] trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod codec;
pub mod draw;
pub mod error;
pub mod matcher;
pub mod participant;
pub mod store;

pub use draw::{Drawn, RevealRecord, draw};
pub use error::{Error, Result};
pub use matcher::{Assignment, MIN_PARTICIPANTS, Matcher, Pairing};
pub use participant::{Participant, ParticipantEntry, ParticipantId};
