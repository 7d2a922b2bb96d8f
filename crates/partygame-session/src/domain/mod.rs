//! Domain model for the session engine.

pub mod aggregates;
pub mod commands;
pub mod drinks;
pub mod events;
pub mod placeholder;
pub mod prompts;
pub mod roster;
