//! Roster entries supplied by the host at session start.

use std::collections::HashSet;

use partygame_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest display name the roster accepts, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Minimum number of real players a session needs.
pub const MIN_PLAYERS: usize = 2;

/// A player's gender, used to pair players for name substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Not stated.
    #[default]
    #[serde(rename = "none")]
    Unspecified,
    /// Female.
    Female,
    /// Male.
    Male,
}

/// What a player is drinking, which scales the sips they take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drink {
    /// Beer.
    #[default]
    Beer,
    /// Wine.
    Wine,
    /// Spirits.
    #[serde(rename = "strong_drink", alias = "strong")]
    Strong,
    /// Not drinking.
    None,
}

/// One participant as entered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Stable identifier, unique within the roster.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Gender.
    #[serde(default)]
    pub gender: Gender,
    /// Drink category.
    #[serde(default)]
    pub drink: Drink,
    /// Whether the player is single; only single players have their name
    /// substituted into other players' prompts.
    #[serde(default)]
    pub single: bool,
}

/// Validates a roster and returns it with names trimmed.
///
/// # Errors
///
/// Returns `DomainError::InsufficientPlayers` for fewer than two entries and
/// `DomainError::Validation` for blank, overlong, or duplicate names and
/// duplicate ids.
pub fn validate_roster(entries: &[RosterEntry]) -> Result<Vec<RosterEntry>, DomainError> {
    if entries.len() < MIN_PLAYERS {
        return Err(DomainError::InsufficientPlayers {
            found: entries.len(),
        });
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    let mut validated = Vec::with_capacity(entries.len());

    for entry in entries {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation(format!(
                "player {} has an empty name",
                entry.id
            )));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "player name \"{name}\" exceeds {MAX_NAME_LEN} characters"
            )));
        }
        if !ids.insert(entry.id) {
            return Err(DomainError::Validation(format!(
                "duplicate player id {}",
                entry.id
            )));
        }
        if !names.insert(name.to_owned()) {
            return Err(DomainError::Validation(format!(
                "player name \"{name}\" is already taken"
            )));
        }

        validated.push(RosterEntry {
            name: name.to_owned(),
            ..entry.clone()
        });
    }

    Ok(validated)
}
