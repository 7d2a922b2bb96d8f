//! Dispatches one CLI action against the saved session.

use std::path::Path;

use partygame_core::rng::StdRngSource;
use partygame_session::application::command_handlers::{
    handle_advance_turn, handle_skip_prompt, handle_start_session,
};
use partygame_session::application::query_handlers::{TurnView, current_turn_view};
use partygame_session::domain::aggregates::SessionState;
use partygame_session::domain::commands::{AdvanceTurn, SkipPrompt, StartSession};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{Action, Config};
use crate::error::AppError;
use crate::store;

/// Mixes the session version into a fixed seed so each invocation draws a
/// fresh but reproducible stream.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

fn rng_for(config: &Config, version: u64) -> StdRngSource {
    match config.seed {
        Some(seed) => StdRngSource::seeded(seed ^ version.wrapping_mul(SEED_STRIDE)),
        None => StdRngSource::from_entropy(),
    }
}

fn required<'a>(path: Option<&'a Path>, flag: &str, var: &str) -> Result<&'a Path, AppError> {
    path.ok_or_else(|| AppError::Config(format!("--{flag} or {var} must be set to start a session")))
}

/// Runs `action` and returns the resulting turn.
///
/// State-changing actions save the new session before returning. A rejected
/// action leaves the saved session as it was.
///
/// # Errors
///
/// Returns `AppError` if configuration or files are missing or malformed, or
/// if the engine rejects the action.
#[instrument(skip_all, fields(action = ?action))]
pub fn run(action: Action, config: &Config) -> Result<TurnView, AppError> {
    let state = match action {
        Action::Start => start(config)?,
        Action::Next => {
            let current = store::load_state(&config.state_path)?;
            let mut rng = rng_for(config, current.version);
            let command = AdvanceTurn {
                correlation_id: Uuid::new_v4(),
            };
            let result = handle_advance_turn(&command, &current, &mut rng)?;
            store::save_state(&config.state_path, &result.state)?;
            result.state
        }
        Action::Skip => {
            let current = store::load_state(&config.state_path)?;
            let mut rng = rng_for(config, current.version);
            let command = SkipPrompt {
                correlation_id: Uuid::new_v4(),
            };
            let result = handle_skip_prompt(&command, &current, &mut rng)?;
            store::save_state(&config.state_path, &result.state)?;
            result.state
        }
        Action::Show => store::load_state(&config.state_path)?,
    };

    view(config, &state)
}

fn start(config: &Config) -> Result<SessionState, AppError> {
    let roster = store::load_roster(required(
        config.roster_path.as_deref(),
        "roster-path",
        "PARTYGAME_ROSTER_PATH",
    )?)?;
    let prompts = store::load_prompts(required(
        config.prompts_path.as_deref(),
        "prompts-path",
        "PARTYGAME_PROMPTS_PATH",
    )?)?;

    let command = StartSession {
        correlation_id: Uuid::new_v4(),
        roster,
        prompts,
        content_mode: config.content_mode(),
        config: config.session_config(),
    };
    let mut rng = rng_for(config, 0);
    let result = handle_start_session(&command, &mut rng)?;
    store::save_state(&config.state_path, &result.state)?;
    info!(
        session_id = %result.state.id,
        players = result.state.players.len() - 1,
        prompts = result.state.prompts.len(),
        "session started"
    );
    Ok(result.state)
}

fn view(config: &Config, state: &SessionState) -> Result<TurnView, AppError> {
    // Rendering draws names, so it gets its own stream keyed past the state.
    let mut rng = rng_for(config, state.version.wrapping_add(1));
    Ok(current_turn_view(state, &mut rng)?)
}
