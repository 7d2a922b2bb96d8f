//! Command handlers for the session engine.
//!
//! Each handler takes the caller's current state by reference, runs one
//! domain transition, and returns the replacement state together with the
//! events it produced. The caller keeps its old state when a handler fails.

use partygame_core::command::Command;
use partygame_core::error::DomainError;
use partygame_core::event::DomainEvent;
use partygame_core::rng::DeterministicRng;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::aggregates::SessionState;
use crate::domain::commands::{AdvanceTurn, SkipPrompt, StartSession};
use crate::domain::events::SessionEvent;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct SessionCommandResult {
    /// The state that replaces the caller's copy.
    pub state: SessionState,
    /// The events produced by the command, in order.
    pub events: Vec<SessionEvent>,
}

fn finish(mut state: SessionState, command: &dyn Command) -> SessionCommandResult {
    let events = state.take_uncommitted_events();
    for event in &events {
        debug!(
            event_type = event.event_type(),
            sequence_number = event.sequence_number(),
            "session event"
        );
    }
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        session_id = %state.id,
        version = state.version,
        round_number = state.round_number,
        "command handled"
    );
    SessionCommandResult { state, events }
}

/// Handles the `StartSession` command: builds a new session and draws its
/// first turn.
///
/// # Errors
///
/// Returns `DomainError` if the roster or pool is invalid, or if no player
/// can be given a first prompt.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub fn handle_start_session(
    command: &StartSession,
    rng: &mut dyn DeterministicRng,
) -> Result<SessionCommandResult, DomainError> {
    let mut state = SessionState::initialize(
        Uuid::new_v4(),
        &command.roster,
        command.prompts.clone(),
        command.content_mode,
        command.config.clone(),
        rng,
    )?;
    let mut events = state.take_uncommitted_events();

    let mut result = finish(state.advance(rng)?, command);
    events.append(&mut result.events);
    result.events = events;
    Ok(result)
}

/// Handles the `AdvanceTurn` command: commits the current turn and draws
/// the next one.
///
/// # Errors
///
/// Returns `DomainError::ExhaustedPromptPool` when the session has run out
/// of content for the drawn player.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, session_id = %state.id))]
pub fn handle_advance_turn(
    command: &AdvanceTurn,
    state: &SessionState,
    rng: &mut dyn DeterministicRng,
) -> Result<SessionCommandResult, DomainError> {
    let next = state.advance(rng)?;
    Ok(finish(next, command))
}

/// Handles the `SkipPrompt` command: swaps the current prompt and spends one
/// of the acting player's skips.
///
/// # Errors
///
/// Returns `DomainError::NoSkipsRemaining`, `DomainError::NoActiveTurn`, or
/// `DomainError::ExhaustedPromptPool` as produced by the domain.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, session_id = %state.id))]
pub fn handle_skip_prompt(
    command: &SkipPrompt,
    state: &SessionState,
    rng: &mut dyn DeterministicRng,
) -> Result<SessionCommandResult, DomainError> {
    let next = state.skip(rng)?;
    Ok(finish(next, command))
}

#[cfg(test)]
mod tests {
    use partygame_core::error::DomainError;
    use partygame_core::event::DomainEvent;
    use partygame_test_support::MockRng;
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_advance_turn, handle_skip_prompt, handle_start_session,
    };
    use crate::domain::aggregates::SessionConfig;
    use crate::domain::commands::{AdvanceTurn, SkipPrompt, StartSession};
    use crate::domain::prompts::{ContentMode, PromptRecord};
    use crate::domain::roster::Gender;
    use crate::fixtures::{entry, four_player_roster, prompt};

    fn start_command(prompts: Vec<PromptRecord>) -> StartSession {
        StartSession {
            correlation_id: Uuid::new_v4(),
            roster: four_player_roster(),
            prompts,
            content_mode: ContentMode::default(),
            config: SessionConfig::default(),
        }
    }

    fn two_prompt_start() -> StartSession {
        start_command(vec![prompt(1, 1), prompt(2, 1)])
    }

    #[test]
    fn test_handle_start_session_draws_first_turn() {
        // Arrange
        let command = start_command(vec![prompt(1, 1), prompt(2, 1)]);

        // Act
        let result = handle_start_session(&command, &mut MockRng).unwrap();

        // Assert
        assert!(result.state.current_player.is_some());
        assert_eq!(result.state.current_prompt.as_ref().map(|p| p.id), Some(1));
        let types: Vec<&str> = result.events.iter().map(DomainEvent::event_type).collect();
        assert_eq!(types, vec!["session.started", "session.turn_started"]);
        assert_eq!(result.events[1].sequence_number, 2);
        assert!(result.state.uncommitted_events().is_empty());
    }

    #[test]
    fn test_handle_start_session_returns_error_for_lone_player() {
        // Arrange
        let mut command = start_command(vec![prompt(1, 1)]);
        command.roster = vec![entry(1, "Ana", Gender::Female, true)];

        // Act
        let result = handle_start_session(&command, &mut MockRng);

        // Assert
        match result.unwrap_err() {
            DomainError::InsufficientPlayers { found } => assert_eq!(found, 1),
            other => panic!("expected InsufficientPlayers, got {other:?}"),
        }
    }

    #[test]
    fn test_handle_start_session_with_empty_pool_returns_exhausted() {
        let command = start_command(vec![]);

        let result = handle_start_session(&command, &mut MockRng);

        assert!(matches!(result, Err(DomainError::ExhaustedPromptPool)));
    }

    #[test]
    fn test_handle_advance_turn_returns_new_state_and_events() {
        // Arrange
        let started = handle_start_session(&two_prompt_start(), &mut MockRng).unwrap();
        let command = AdvanceTurn {
            correlation_id: Uuid::new_v4(),
        };

        // Act
        let result = handle_advance_turn(&command, &started.state, &mut MockRng).unwrap();

        // Assert
        assert_eq!(result.state.answered_ids.len(), 1);
        let types: Vec<&str> = result.events.iter().map(DomainEvent::event_type).collect();
        assert_eq!(types, vec!["session.prompt_answered", "session.turn_started"]);
        assert!(started.state.answered_ids.is_empty());
    }

    #[test]
    fn test_handle_skip_prompt_returns_error_without_skips() {
        // Arrange
        let mut state = handle_start_session(&two_prompt_start(), &mut MockRng)
            .unwrap()
            .state;
        state.players[0].skip_count = 0;
        let command = SkipPrompt {
            correlation_id: Uuid::new_v4(),
        };

        // Act
        let result = handle_skip_prompt(&command, &state, &mut MockRng);

        // Assert
        assert!(matches!(result, Err(DomainError::NoSkipsRemaining)));
    }

    #[test]
    fn test_handle_skip_prompt_emits_prompt_skipped() {
        let state = handle_start_session(&two_prompt_start(), &mut MockRng)
            .unwrap()
            .state;
        let command = SkipPrompt {
            correlation_id: Uuid::new_v4(),
        };

        let result = handle_skip_prompt(&command, &state, &mut MockRng).unwrap();

        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].event_type(), "session.prompt_skipped");
        assert_eq!(result.state.current_prompt.as_ref().map(|p| p.id), Some(2));
    }
}
