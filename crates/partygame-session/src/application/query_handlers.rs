//! Query handlers for the session engine.
//!
//! This module builds read-only view DTOs the presentation layer renders.

use partygame_core::error::DomainError;
use partygame_core::rng::DeterministicRng;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::{ActingParty, SessionState};
use crate::domain::prompts::PromptId;

/// Sips one player owes if they refuse the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SipAssignment {
    /// The player.
    pub player_id: Uuid,
    /// The player's display name.
    pub name: String,
    /// Sips owed.
    pub sips: u32,
}

/// Read-only view of the current turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current round.
    pub round_number: u32,
    /// Who is acting.
    pub party: ActingParty,
    /// Display name of the acting party.
    pub player_name: String,
    /// The prompt identifier.
    pub prompt_id: PromptId,
    /// Prompt text with player names substituted.
    pub text: String,
    /// Prompt difficulty.
    pub difficulty: i32,
    /// Whether the prompt is mature.
    pub mature: bool,
    /// Whether the prompt is a challenge.
    pub challenge: bool,
    /// Whether the prompt addresses the whole table.
    pub all_players: bool,
    /// Skips the acting party has left.
    pub skips_remaining: u32,
    /// Sips owed on refusal: the acting player alone, or every real player
    /// on an all-players turn.
    pub sips: Vec<SipAssignment>,
}

/// Builds the view of the current turn, rendering placeholders.
///
/// Rendering draws from `rng`, so repeated calls may name different players.
///
/// # Errors
///
/// Returns `DomainError::NoActiveTurn` before the first turn is drawn and
/// `DomainError::UnknownPlayer` if the acting party is missing from the
/// roster.
pub fn current_turn_view(
    state: &SessionState,
    rng: &mut dyn DeterministicRng,
) -> Result<TurnView, DomainError> {
    let (Some(party), Some(prompt)) = (state.current_player, state.current_prompt.as_ref()) else {
        return Err(DomainError::NoActiveTurn);
    };
    let actor = state.player(party).ok_or_else(|| match party {
        ActingParty::Individual(id) => DomainError::UnknownPlayer(id),
        ActingParty::Everyone => DomainError::NoActiveTurn,
    })?;

    let sips = state
        .players
        .iter()
        .filter(|p| match party {
            ActingParty::Everyone => p.is_individual(),
            ActingParty::Individual(_) => p.party == party,
        })
        .filter_map(|p| match p.party {
            ActingParty::Individual(player_id) => Some(SipAssignment {
                player_id,
                name: p.name.clone(),
                sips: p.sips_for(prompt),
            }),
            ActingParty::Everyone => None,
        })
        .collect();

    Ok(TurnView {
        session_id: state.id,
        round_number: state.round_number,
        party,
        player_name: actor.name.clone(),
        prompt_id: prompt.id,
        text: state.render_prompt(&prompt.text, party, rng),
        difficulty: prompt.difficulty,
        mature: prompt.mature,
        challenge: prompt.challenge,
        all_players: prompt.all_players,
        skips_remaining: actor.skip_count,
        sips,
    })
}
