//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Fewer than two real players were supplied at session start.
    #[error("at least 2 players are required, found {found}")]
    InsufficientPlayers {
        /// Number of real players in the roster.
        found: usize,
    },

    /// A player was requested from an empty round. The round must be rolled
    /// over first; reaching this is a sequencing bug.
    #[error("no players remain in the current round")]
    NoRemainingPlayers,

    /// No prompt in the session pool satisfies the current selection.
    #[error("no eligible prompt remains in the pool")]
    ExhaustedPromptPool,

    /// The acting player has no skip credits left.
    #[error("no skips remaining for the current player")]
    NoSkipsRemaining,

    /// A turn-scoped action was invoked before the first turn was drawn.
    #[error("the session has no active turn")]
    NoActiveTurn,

    /// A player id is not part of the session roster.
    #[error("player not found: {0}")]
    UnknownPlayer(Uuid),

    /// A validation error in domain input.
    #[error("validation error: {0}")]
    Validation(String),
}
