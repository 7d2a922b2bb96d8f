//! Command-line host for the party game session engine.
//!
//! The engine itself never touches storage; this crate plays the host's
//! part. It reads the roster and prompt pool from files, keeps the session
//! state in a JSON file between invocations, and prints the current turn.

pub mod config;
pub mod error;
pub mod run;
pub mod store;
