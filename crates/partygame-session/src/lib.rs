//! Session engine bounded context: turn scheduling and prompt selection.
//!
//! Decides whose turn it is and which prompt they get, fills player names
//! into prompt text, and advances the session after each turn. Storage is
//! left to the host: every transition hands back a new `SessionState`.

pub mod application;
pub mod domain;

#[cfg(test)]
pub(crate) mod fixtures;
