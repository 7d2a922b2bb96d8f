//! Shared domain abstractions for the party game engine.
//!
//! This crate defines the fundamental traits and types the session engine
//! depends on. It contains no game rules and no infrastructure code.

pub mod command;
pub mod error;
pub mod event;
pub mod rng;
