//! Shared test doubles for the party game session engine.

mod rng;

pub use rng::{MockRng, SequenceRng};
