//! Aggregate root for a play session.
//!
//! `SessionState` is a plain value: every transition borrows the current
//! state and hands back a new one, so a failed transition leaves the
//! caller's copy untouched. The host persists the value verbatim between
//! turns.

use std::collections::BTreeSet;
use std::fmt;

use partygame_core::error::DomainError;
use partygame_core::rng::{DeterministicRng, choose_index, shuffle};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::drinks::sips_for;
use super::events::{
    EveryoneTurnForfeited, PromptAnswered, PromptSkipped, RoundRolledOver, SessionEvent,
    SessionEventKind, SessionStarted, SkipsGranted, TurnStarted,
};
use super::placeholder::{DEFAULT_PLACEHOLDER_TOKEN, count_placeholders, substitute};
use super::prompts::{
    ContentMode, PromptId, PromptRecord, existing_difficulties, filter_pool, validate_pool,
};
use super::roster::{Drink, Gender, RosterEntry, validate_roster};

/// Display name of the all-players pseudo-player.
pub const EVERYONE_NAME: &str = "All players";

/// Who a turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ActingParty {
    /// A real player.
    Individual(Uuid),
    /// The whole table.
    Everyone,
}

impl fmt::Display for ActingParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Individual(id) => write!(f, "player:{id}"),
            Self::Everyone => f.write_str("everyone"),
        }
    }
}

/// Rules fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Skips each real player starts with.
    pub initial_skip_count: u32,
    /// Every real player gains a skip when a round numbered
    /// `k * interval + 1` begins (k >= 1). Zero disables the bonus.
    pub skip_bonus_interval: u32,
    /// Token replaced with player names in prompt text.
    pub placeholder_token: String,
    /// When the all-players entry is drawn and no all-players prompt is
    /// left, drop its turn for the round and draw again instead of failing
    /// with `ExhaustedPromptPool`.
    pub forfeit_exhausted_table_turn: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_skip_count: 1,
            skip_bonus_interval: 10,
            placeholder_token: DEFAULT_PLACEHOLDER_TOKEN.to_owned(),
            forfeit_exhausted_table_turn: false,
        }
    }
}

/// Turn bookkeeping for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTurnState {
    /// Identity within the session.
    pub party: ActingParty,
    /// Display name.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Drink category.
    pub drink: Drink,
    /// Whether the player is single.
    pub single: bool,
    /// Skip credits still available.
    pub skip_count: u32,
    /// Permutation of the session's difficulty levels; empty for the
    /// all-players entry.
    pub difficulty_queue: Vec<i32>,
    /// Cursor into `difficulty_queue`.
    pub difficulty_index: usize,
    /// Turns committed so far.
    pub total_answered: u32,
}

impl PlayerTurnState {
    fn individual(entry: RosterEntry, skip_count: u32, difficulty_queue: Vec<i32>) -> Self {
        Self {
            party: ActingParty::Individual(entry.id),
            name: entry.name,
            gender: entry.gender,
            drink: entry.drink,
            single: entry.single,
            skip_count,
            difficulty_queue,
            difficulty_index: 0,
            total_answered: 0,
        }
    }

    fn everyone() -> Self {
        Self {
            party: ActingParty::Everyone,
            name: EVERYONE_NAME.to_owned(),
            gender: Gender::Unspecified,
            drink: Drink::None,
            single: false,
            skip_count: 0,
            difficulty_queue: Vec::new(),
            difficulty_index: 0,
            total_answered: 0,
        }
    }

    /// Returns `true` for real players.
    #[must_use]
    pub fn is_individual(&self) -> bool {
        matches!(self.party, ActingParty::Individual(_))
    }

    /// The difficulty this player is due to receive next, if any.
    #[must_use]
    pub fn target_difficulty(&self) -> Option<i32> {
        self.difficulty_queue.get(self.difficulty_index).copied()
    }

    /// Sips this player takes for `prompt`.
    #[must_use]
    pub fn sips_for(&self, prompt: &PromptRecord) -> u32 {
        sips_for(prompt.punishment, self.drink)
    }
}

/// The aggregate root for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Session identifier.
    pub id: Uuid,
    /// Number of events emitted so far.
    pub version: u64,
    /// Session rules.
    pub config: SessionConfig,
    /// Every participant in roster order, the all-players entry last.
    pub players: Vec<PlayerTurnState>,
    /// Prompt pool after content filtering.
    pub prompts: Vec<PromptRecord>,
    /// Prompts already committed this session.
    pub answered_ids: BTreeSet<PromptId>,
    /// Parties still to play in the current round.
    pub round_remaining: Vec<ActingParty>,
    /// Who holds the current turn.
    pub current_player: Option<ActingParty>,
    /// The prompt of the current turn.
    pub current_prompt: Option<PromptRecord>,
    /// Current round, starting at 1.
    pub round_number: u32,
    /// Distinct difficulty levels of `prompts`, ascending.
    pub existing_difficulties: Vec<i32>,
    /// Events produced by the transition that built this value.
    #[serde(skip)]
    uncommitted_events: Vec<SessionEvent>,
}

impl SessionState {
    /// Builds a session from a roster and the record store's prompt pool.
    ///
    /// The returned state has no current turn; the first [`advance`] draws
    /// it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientPlayers` for fewer than two
    /// players and `DomainError::Validation` for malformed roster or pool
    /// entries.
    ///
    /// [`advance`]: SessionState::advance
    pub fn initialize(
        id: Uuid,
        roster: &[RosterEntry],
        prompts: Vec<PromptRecord>,
        content_mode: ContentMode,
        config: SessionConfig,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, DomainError> {
        let roster = validate_roster(roster)?;
        validate_pool(&prompts)?;

        let prompts = filter_pool(prompts, content_mode);
        let difficulties = existing_difficulties(&prompts);

        let mut players: Vec<PlayerTurnState> = roster
            .into_iter()
            .map(|entry| {
                let mut queue = difficulties.clone();
                shuffle(&mut queue, rng);
                PlayerTurnState::individual(entry, config.initial_skip_count, queue)
            })
            .collect();
        players.push(PlayerTurnState::everyone());

        let mut state = Self {
            id,
            version: 0,
            config,
            round_remaining: players.iter().map(|p| p.party).collect(),
            players,
            prompts,
            answered_ids: BTreeSet::new(),
            current_player: None,
            current_prompt: None,
            round_number: 1,
            existing_difficulties: difficulties,
            uncommitted_events: Vec::new(),
        };

        let started = SessionStarted {
            player_count: state.players.len() - 1,
            prompt_count: state.prompts.len(),
            difficulties: state.existing_difficulties.clone(),
        };
        state.record(SessionEventKind::SessionStarted(started));
        Ok(state)
    }

    /// Events produced by the transition that returned this state.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[SessionEvent] {
        &self.uncommitted_events
    }

    /// Removes and returns the uncommitted events.
    pub fn take_uncommitted_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    /// Looks up a participant.
    #[must_use]
    pub fn player(&self, party: ActingParty) -> Option<&PlayerTurnState> {
        self.players.iter().find(|p| p.party == party)
    }

    fn player_or_err(&self, party: ActingParty) -> Result<&PlayerTurnState, DomainError> {
        self.player(party).ok_or_else(|| match party {
            ActingParty::Individual(id) => DomainError::UnknownPlayer(id),
            ActingParty::Everyone => {
                DomainError::Validation("session has no all-players entry".to_owned())
            }
        })
    }

    fn player_mut(&mut self, party: ActingParty) -> Option<&mut PlayerTurnState> {
        self.players.iter_mut().find(|p| p.party == party)
    }

    /// Real players other than `actor` whose name may stand in for a
    /// placeholder: a different gender and single.
    #[must_use]
    pub fn eligible_others(&self, actor: &PlayerTurnState) -> Vec<&PlayerTurnState> {
        self.players
            .iter()
            .filter(|p| {
                p.is_individual() && p.party != actor.party && p.gender != actor.gender && p.single
            })
            .collect()
    }

    /// Draws the next party uniformly from those still to play this round.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoRemainingPlayers` if the round is exhausted.
    pub fn pick_next_player(
        &self,
        rng: &mut dyn DeterministicRng,
    ) -> Result<ActingParty, DomainError> {
        choose_index(self.round_remaining.len(), rng)
            .map(|i| self.round_remaining[i])
            .ok_or(DomainError::NoRemainingPlayers)
    }

    /// Chooses an unanswered prompt for `party` without changing state.
    ///
    /// The all-players entry draws from all-players prompts at any
    /// difficulty. A real player draws from individual prompts at their
    /// target difficulty, stepping down through the lower levels present in
    /// the pool until one has a prompt the table can fill.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ExhaustedPromptPool` if nothing qualifies and
    /// `DomainError::UnknownPlayer` if `party` is not in the session.
    pub fn pick_next_prompt(
        &self,
        party: ActingParty,
        rng: &mut dyn DeterministicRng,
    ) -> Result<&PromptRecord, DomainError> {
        let player = self.player_or_err(party)?;

        if party == ActingParty::Everyone {
            let candidates: Vec<&PromptRecord> = self
                .prompts
                .iter()
                .filter(|p| p.all_players && !self.answered_ids.contains(&p.id))
                .collect();
            return choose_index(candidates.len(), rng)
                .map(|i| candidates[i])
                .ok_or(DomainError::ExhaustedPromptPool);
        }

        let target = player
            .target_difficulty()
            .ok_or(DomainError::ExhaustedPromptPool)?;
        let others = self.eligible_others(player).len();

        for &difficulty in self.existing_difficulties.iter().rev() {
            if difficulty > target {
                continue;
            }
            let candidates: Vec<&PromptRecord> = self
                .prompts
                .iter()
                .filter(|p| {
                    !p.all_players
                        && p.difficulty == difficulty
                        && !self.answered_ids.contains(&p.id)
                        && self.table_can_fill(p, others)
                })
                .collect();
            if let Some(i) = choose_index(candidates.len(), rng) {
                return Ok(candidates[i]);
            }
        }

        Err(DomainError::ExhaustedPromptPool)
    }

    fn table_can_fill(&self, prompt: &PromptRecord, eligible_others: usize) -> bool {
        if prompt.requires_opposite_gender && eligible_others == 0 {
            return false;
        }
        count_placeholders(&prompt.text, &self.config.placeholder_token) <= eligible_others
    }

    /// Substitutes player names into `text` for a turn held by `party`.
    ///
    /// Eligible other players are shuffled and assigned to placeholders
    /// left to right, reusing names when there are more placeholders than
    /// players. Text without placeholders, or with nobody eligible, comes
    /// back unchanged.
    #[must_use]
    pub fn render_prompt(
        &self,
        text: &str,
        party: ActingParty,
        rng: &mut dyn DeterministicRng,
    ) -> String {
        let token = self.config.placeholder_token.as_str();
        let slots = count_placeholders(text, token);
        if slots == 0 {
            return text.to_owned();
        }
        let Some(actor) = self.player(party) else {
            return text.to_owned();
        };

        let mut names: Vec<&str> = self
            .eligible_others(actor)
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        if names.is_empty() {
            return text.to_owned();
        }
        shuffle(&mut names, rng);
        names.truncate(slots);

        substitute(text, token, &names)
    }

    /// Commits the current turn and draws the next one.
    ///
    /// Called on a state without a current turn, this only draws.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ExhaustedPromptPool` when the drawn party has
    /// nothing left to play. That includes the all-players entry unless
    /// [`SessionConfig::forfeit_exhausted_table_turn`] is set.
    pub fn advance(&self, rng: &mut dyn DeterministicRng) -> Result<Self, DomainError> {
        let mut next = self.clone();
        next.uncommitted_events.clear();
        next.commit_current_turn();
        next.draw_turn(rng)?;
        Ok(next)
    }

    /// Replaces the current prompt with another individual prompt of the
    /// same difficulty, spending one of the acting player's skips.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoActiveTurn` before the first turn,
    /// `DomainError::NoSkipsRemaining` if the player has no skips left,
    /// and `DomainError::ExhaustedPromptPool` if no replacement exists.
    pub fn skip(&self, rng: &mut dyn DeterministicRng) -> Result<Self, DomainError> {
        let (Some(party), Some(current)) = (self.current_player, self.current_prompt.as_ref())
        else {
            return Err(DomainError::NoActiveTurn);
        };
        if self.player_or_err(party)?.skip_count == 0 {
            return Err(DomainError::NoSkipsRemaining);
        }

        let candidates: Vec<&PromptRecord> = self
            .prompts
            .iter()
            .filter(|p| {
                !p.all_players
                    && p.id != current.id
                    && p.difficulty == current.difficulty
                    && !self.answered_ids.contains(&p.id)
            })
            .collect();
        let replacement = choose_index(candidates.len(), rng)
            .map(|i| candidates[i].clone())
            .ok_or(DomainError::ExhaustedPromptPool)?;

        let mut next = self.clone();
        next.uncommitted_events.clear();
        let mut skips_remaining = 0;
        if let Some(player) = next.player_mut(party) {
            player.skip_count = player.skip_count.saturating_sub(1);
            skips_remaining = player.skip_count;
        }
        let skipped = PromptSkipped {
            party,
            skipped_prompt_id: current.id,
            replacement_prompt_id: replacement.id,
            skips_remaining,
        };
        next.current_prompt = Some(replacement);
        next.record(SessionEventKind::PromptSkipped(skipped));
        Ok(next)
    }

    fn commit_current_turn(&mut self) {
        let Some(party) = self.current_player else {
            return;
        };
        if let Some(prompt_id) = self.current_prompt.as_ref().map(|p| p.id) {
            self.answered_ids.insert(prompt_id);
            if let Some(player) = self.player_mut(party) {
                player.total_answered += 1;
            }
            self.record(SessionEventKind::PromptAnswered(PromptAnswered {
                party,
                prompt_id,
            }));
        }
        self.round_remaining.retain(|p| *p != party);
    }

    fn draw_turn(&mut self, rng: &mut dyn DeterministicRng) -> Result<(), DomainError> {
        loop {
            if self.round_remaining.is_empty() {
                self.roll_over();
            }
            let party = self.pick_next_player(rng)?;
            if party != ActingParty::Everyone {
                self.advance_difficulty(party, rng);
            }

            match self.pick_next_prompt(party, rng).cloned() {
                Ok(prompt) => {
                    self.record(SessionEventKind::TurnStarted(TurnStarted {
                        party,
                        prompt_id: prompt.id,
                        difficulty: prompt.difficulty,
                        round_number: self.round_number,
                    }));
                    self.current_player = Some(party);
                    self.current_prompt = Some(prompt);
                    return Ok(());
                }
                Err(DomainError::ExhaustedPromptPool)
                    if party == ActingParty::Everyone
                        && self.config.forfeit_exhausted_table_turn =>
                {
                    self.round_remaining.retain(|p| *p != party);
                    let round_number = self.round_number;
                    warn!(
                        session_id = %self.id,
                        round_number,
                        "no all-players prompt left, table turn forfeited"
                    );
                    self.record(SessionEventKind::EveryoneTurnForfeited(
                        EveryoneTurnForfeited { round_number },
                    ));
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn advance_difficulty(&mut self, party: ActingParty, rng: &mut dyn DeterministicRng) {
        let Some(player) = self.player_mut(party) else {
            return;
        };
        if player.difficulty_queue.is_empty() {
            return;
        }
        if player.difficulty_index + 1 >= player.difficulty_queue.len() {
            shuffle(&mut player.difficulty_queue, rng);
            player.difficulty_index = 0;
        } else {
            player.difficulty_index += 1;
        }
    }

    fn roll_over(&mut self) {
        self.round_remaining = self.players.iter().map(|p| p.party).collect();
        self.round_number += 1;
        let round_number = self.round_number;
        self.record(SessionEventKind::RoundRolledOver(RoundRolledOver {
            round_number,
        }));

        let interval = self.config.skip_bonus_interval;
        if interval > 0 && round_number % interval == 1 && round_number != 1 {
            let mut credited = 0;
            for player in self.players.iter_mut().filter(|p| p.is_individual()) {
                player.skip_count += 1;
                credited += 1;
            }
            self.record(SessionEventKind::SkipsGranted(SkipsGranted {
                round_number,
                player_count: credited,
            }));
        }
    }

    fn record(&mut self, kind: SessionEventKind) {
        self.version += 1;
        self.uncommitted_events.push(SessionEvent {
            session_id: self.id,
            sequence_number: self.version,
            kind,
        });
    }
}
