//! Commands for the session engine.

use partygame_core::command::Command;
use uuid::Uuid;

use super::aggregates::SessionConfig;
use super::prompts::{ContentMode, PromptRecord};
use super::roster::RosterEntry;

/// Command to start a new session and draw its first turn.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Players at the table.
    pub roster: Vec<RosterEntry>,
    /// Prompt pool delivered by the record store.
    pub prompts: Vec<PromptRecord>,
    /// Which prompts to play with.
    pub content_mode: ContentMode,
    /// Session rules.
    pub config: SessionConfig,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "session.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to commit the current turn and draw the next one.
#[derive(Debug, Clone)]
pub struct AdvanceTurn {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for AdvanceTurn {
    fn command_type(&self) -> &'static str {
        "session.advance_turn"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to swap the current prompt, spending one skip.
#[derive(Debug, Clone)]
pub struct SkipPrompt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for SkipPrompt {
    fn command_type(&self) -> &'static str {
        "session.skip_prompt"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
