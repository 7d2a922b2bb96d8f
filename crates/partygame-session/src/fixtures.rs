//! Builders shared by this crate's unit tests.

use partygame_test_support::MockRng;
use uuid::Uuid;

use crate::domain::aggregates::{SessionConfig, SessionState};
use crate::domain::placeholder::DEFAULT_PLACEHOLDER_TOKEN;
use crate::domain::prompts::{ContentMode, PromptId, PromptRecord};
use crate::domain::roster::{Drink, Gender, RosterEntry};

pub(crate) fn entry(n: u128, name: &str, gender: Gender, single: bool) -> RosterEntry {
    RosterEntry {
        id: Uuid::from_u128(n),
        name: name.to_owned(),
        gender,
        drink: Drink::Beer,
        single,
    }
}

/// Two single women and two single men.
pub(crate) fn four_player_roster() -> Vec<RosterEntry> {
    vec![
        entry(1, "Ana", Gender::Female, true),
        entry(2, "Bea", Gender::Female, true),
        entry(3, "Cid", Gender::Male, true),
        entry(4, "Dan", Gender::Male, true),
    ]
}

pub(crate) fn prompt(id: PromptId, difficulty: i32) -> PromptRecord {
    PromptRecord {
        id,
        text: format!("Prompt {id}"),
        mature: false,
        challenge: false,
        all_players: false,
        requires_opposite_gender: false,
        punishment: 2,
        difficulty,
        like_count: 0,
        dislike_count: 0,
    }
}

pub(crate) fn placeholder_prompt(id: PromptId, difficulty: i32, slots: usize) -> PromptRecord {
    let names = vec![DEFAULT_PLACEHOLDER_TOKEN; slots].join(" and ");
    PromptRecord {
        text: format!("Dance with {names}"),
        ..prompt(id, difficulty)
    }
}

/// A difficulty 1 prompt addressed to the whole table.
pub(crate) fn table_prompt(id: PromptId) -> PromptRecord {
    PromptRecord {
        all_players: true,
        ..prompt(id, 1)
    }
}

/// Initializes a session with default rules, drawing shuffles from
/// `MockRng`.
pub(crate) fn session_with(roster: Vec<RosterEntry>, pool: Vec<PromptRecord>) -> SessionState {
    session_with_config(roster, pool, SessionConfig::default())
}

pub(crate) fn session_with_config(
    roster: Vec<RosterEntry>,
    pool: Vec<PromptRecord>,
    config: SessionConfig,
) -> SessionState {
    SessionState::initialize(
        Uuid::from_u128(0xC0FFEE),
        &roster,
        pool,
        ContentMode::default(),
        config,
        &mut MockRng,
    )
    .unwrap()
}
