//! Domain events for the session engine.
//!
//! Every transition reports what happened as a list of events so the host
//! can animate, log, or audit turns without diffing states.

use partygame_core::event::DomainEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregates::ActingParty;
use super::prompts::PromptId;

/// Emitted when a session is created from a roster and prompt pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    /// Number of real players.
    pub player_count: usize,
    /// Number of prompts left after content filtering.
    pub prompt_count: usize,
    /// Distinct difficulty levels in the filtered pool.
    pub difficulties: Vec<i32>,
}

/// Emitted when a party is handed a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStarted {
    /// Who is acting.
    pub party: ActingParty,
    /// The prompt drawn.
    pub prompt_id: PromptId,
    /// Difficulty of the prompt drawn.
    pub difficulty: i32,
    /// Round the turn belongs to.
    pub round_number: u32,
}

/// Emitted when a turn is committed and its prompt retired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptAnswered {
    /// Who answered.
    pub party: ActingParty,
    /// The retired prompt.
    pub prompt_id: PromptId,
}

/// Emitted when every party has had its turn and a new round begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRolledOver {
    /// The round that just began.
    pub round_number: u32,
}

/// Emitted when real players receive their periodic bonus skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipsGranted {
    /// Round that triggered the bonus.
    pub round_number: u32,
    /// Number of players credited.
    pub player_count: usize,
}

/// Emitted when the acting player swaps their prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSkipped {
    /// Who skipped.
    pub party: ActingParty,
    /// The prompt that was set aside.
    pub skipped_prompt_id: PromptId,
    /// The prompt that replaced it.
    pub replacement_prompt_id: PromptId,
    /// Skip credits left afterwards.
    pub skips_remaining: u32,
}

/// Emitted when the all-players turn is dropped because no all-players
/// prompt is left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EveryoneTurnForfeited {
    /// Round in which the turn was dropped.
    pub round_number: u32,
}

/// Event type identifier for [`SessionStarted`].
pub const SESSION_STARTED_EVENT_TYPE: &str = "session.started";

/// Event type identifier for [`TurnStarted`].
pub const TURN_STARTED_EVENT_TYPE: &str = "session.turn_started";

/// Event type identifier for [`PromptAnswered`].
pub const PROMPT_ANSWERED_EVENT_TYPE: &str = "session.prompt_answered";

/// Event type identifier for [`RoundRolledOver`].
pub const ROUND_ROLLED_OVER_EVENT_TYPE: &str = "session.round_rolled_over";

/// Event type identifier for [`SkipsGranted`].
pub const SKIPS_GRANTED_EVENT_TYPE: &str = "session.skips_granted";

/// Event type identifier for [`PromptSkipped`].
pub const PROMPT_SKIPPED_EVENT_TYPE: &str = "session.prompt_skipped";

/// Event type identifier for [`EveryoneTurnForfeited`].
pub const EVERYONE_TURN_FORFEITED_EVENT_TYPE: &str = "session.everyone_turn_forfeited";

/// Event payload variants for the session engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// A session has started.
    SessionStarted(SessionStarted),
    /// A turn has started.
    TurnStarted(TurnStarted),
    /// A prompt has been answered.
    PromptAnswered(PromptAnswered),
    /// A new round has begun.
    RoundRolledOver(RoundRolledOver),
    /// Bonus skips have been granted.
    SkipsGranted(SkipsGranted),
    /// A prompt has been skipped.
    PromptSkipped(PromptSkipped),
    /// The all-players turn has been forfeited.
    EveryoneTurnForfeited(EveryoneTurnForfeited),
}

/// Domain event envelope for the session engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// The session this event belongs to.
    pub session_id: Uuid,
    /// Position of this event in the session's history, starting at 1.
    pub sequence_number: u64,
    /// Event-specific payload.
    pub kind: SessionEventKind,
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            SessionEventKind::SessionStarted(_) => SESSION_STARTED_EVENT_TYPE,
            SessionEventKind::TurnStarted(_) => TURN_STARTED_EVENT_TYPE,
            SessionEventKind::PromptAnswered(_) => PROMPT_ANSWERED_EVENT_TYPE,
            SessionEventKind::RoundRolledOver(_) => ROUND_ROLLED_OVER_EVENT_TYPE,
            SessionEventKind::SkipsGranted(_) => SKIPS_GRANTED_EVENT_TYPE,
            SessionEventKind::PromptSkipped(_) => PROMPT_SKIPPED_EVENT_TYPE,
            SessionEventKind::EveryoneTurnForfeited(_) => EVERYONE_TURN_FORFEITED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn sequence_number(&self) -> u64 {
        self.sequence_number
    }
}
