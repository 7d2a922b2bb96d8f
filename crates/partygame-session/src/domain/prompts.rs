//! Prompt records and session pool preparation.

use std::collections::{BTreeSet, HashSet};

use partygame_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of a prompt in the external record store.
pub type PromptId = i64;

/// A single question or challenge shown during a turn.
///
/// Field aliases accept the record store's column names so a raw export can
/// be fed to the engine directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Unique, stable identifier.
    pub id: PromptId,
    /// Prompt text, possibly containing placeholder tokens.
    #[serde(alias = "question")]
    pub text: String,
    /// Adult content.
    #[serde(default, alias = "dirty")]
    pub mature: bool,
    /// Physical or action-based challenge.
    #[serde(default)]
    pub challenge: bool,
    /// Addressed to the whole table rather than one player.
    #[serde(default)]
    pub all_players: bool,
    /// Only makes sense when an opposite-gender single player is present.
    #[serde(default, alias = "need_opposite_gender")]
    pub requires_opposite_gender: bool,
    /// Severity used to compute the sips a refusal costs.
    #[serde(default)]
    pub punishment: u32,
    /// Difficulty level.
    #[serde(default = "default_difficulty")]
    pub difficulty: i32,
    /// Likes recorded by the record store.
    #[serde(default)]
    pub like_count: u32,
    /// Dislikes recorded by the record store.
    #[serde(default)]
    pub dislike_count: u32,
}

fn default_difficulty() -> i32 {
    1
}

/// Which prompts a session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ContentMode {
    /// Regular prompts, optionally widened with mature prompts and/or
    /// challenges.
    Standard {
        /// Include mature prompts.
        mature: bool,
        /// Include challenges.
        challenges: bool,
    },
    /// Mature prompts only, challenges included.
    MatureOnly,
}

impl Default for ContentMode {
    fn default() -> Self {
        Self::Standard {
            mature: false,
            challenges: false,
        }
    }
}

impl ContentMode {
    /// Returns `true` if `prompt` belongs in a session played in this mode.
    #[must_use]
    pub fn admits(&self, prompt: &PromptRecord) -> bool {
        match *self {
            Self::MatureOnly => prompt.mature,
            Self::Standard { mature, challenges } => {
                (mature || !prompt.mature) && (challenges || !prompt.challenge)
            }
        }
    }
}

/// Checks the pool delivered by the record store.
///
/// # Errors
///
/// Returns `DomainError::Validation` if two prompts share an id or a prompt
/// has blank text.
pub fn validate_pool(prompts: &[PromptRecord]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for prompt in prompts {
        if !seen.insert(prompt.id) {
            return Err(DomainError::Validation(format!(
                "duplicate prompt id {}",
                prompt.id
            )));
        }
        if prompt.text.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "prompt {} has empty text",
                prompt.id
            )));
        }
    }
    Ok(())
}

/// Keeps the prompts admitted by `mode`, preserving pool order.
#[must_use]
pub fn filter_pool(prompts: Vec<PromptRecord>, mode: ContentMode) -> Vec<PromptRecord> {
    prompts.into_iter().filter(|p| mode.admits(p)).collect()
}

/// Distinct difficulty levels present in `prompts`, ascending.
#[must_use]
pub fn existing_difficulties(prompts: &[PromptRecord]) -> Vec<i32> {
    prompts
        .iter()
        .map(|p| p.difficulty)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
