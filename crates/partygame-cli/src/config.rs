//! Command-line arguments, each backed by a `PARTYGAME_*` environment
//! variable.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use partygame_session::domain::aggregates::SessionConfig;
use partygame_session::domain::prompts::ContentMode;

/// Default location of the saved session.
pub const DEFAULT_STATE_PATH: &str = "partygame-session.json";

#[derive(Debug, Parser)]
#[command(name = "partygame", version, about = "Runs a party game session from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub action: Action,

    #[command(flatten)]
    pub config: Config,
}

/// What the host asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Action {
    /// Start a new session from the roster and prompt files.
    Start,
    /// Commit the current turn and draw the next.
    Next,
    /// Swap the current prompt for another of the same difficulty.
    Skip,
    /// Show the current turn without changing anything.
    Show,
}

/// Host configuration shared by every action.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct Config {
    /// Where the session state is kept between invocations.
    #[arg(long, global = true, env = "PARTYGAME_STATE_PATH", default_value = DEFAULT_STATE_PATH)]
    pub state_path: PathBuf,

    /// Roster file (JSON or YAML), needed by `start`.
    #[arg(long, global = true, env = "PARTYGAME_ROSTER_PATH")]
    pub roster_path: Option<PathBuf>,

    /// Prompt pool file (JSON or YAML), needed by `start`.
    #[arg(long, global = true, env = "PARTYGAME_PROMPTS_PATH")]
    pub prompts_path: Option<PathBuf>,

    /// Include mature prompts.
    #[arg(long, global = true, env = "PARTYGAME_MATURE", value_parser = BoolishValueParser::new())]
    pub mature: bool,

    /// Include challenge prompts.
    #[arg(long, global = true, env = "PARTYGAME_CHALLENGES", value_parser = BoolishValueParser::new())]
    pub challenges: bool,

    /// Play with mature prompts only; overrides the other content flags.
    #[arg(long, global = true, env = "PARTYGAME_MATURE_ONLY", value_parser = BoolishValueParser::new())]
    pub mature_only: bool,

    /// Fixed seed for a reproducible session.
    #[arg(long, global = true, env = "PARTYGAME_SEED")]
    pub seed: Option<u64>,

    /// A skip is granted to every player each time this many rounds pass.
    #[arg(long, global = true, env = "PARTYGAME_SKIP_BONUS_INTERVAL", default_value_t = 10)]
    pub skip_bonus_interval: u32,

    /// Drop the all-players turn for the round when its prompts run out,
    /// instead of ending the session.
    #[arg(long, global = true, env = "PARTYGAME_FORFEIT_TABLE_TURN", value_parser = BoolishValueParser::new())]
    pub forfeit_table_turn: bool,
}

impl Config {
    /// Which prompts a new session plays with.
    #[must_use]
    pub fn content_mode(&self) -> ContentMode {
        if self.mature_only {
            ContentMode::MatureOnly
        } else {
            ContentMode::Standard {
                mature: self.mature,
                challenges: self.challenges,
            }
        }
    }

    /// Rules for a new session.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            skip_bonus_interval: self.skip_bonus_interval,
            forfeit_exhausted_table_turn: self.forfeit_table_turn,
            ..SessionConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("partygame").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;

        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_applies_defaults() {
        let cli = parse(&["show"]).unwrap();

        assert_eq!(cli.action, Action::Show);
        assert_eq!(cli.config.state_path, PathBuf::from(DEFAULT_STATE_PATH));
        assert_eq!(cli.config.content_mode(), ContentMode::default());
        assert_eq!(cli.config.session_config(), SessionConfig::default());
        assert_eq!(cli.config.seed, None);
        assert!(cli.config.roster_path.is_none());
    }

    #[test]
    fn test_parse_reads_content_flags() {
        let cli = parse(&["start", "--mature", "--challenges"]).unwrap();

        assert_eq!(
            cli.config.content_mode(),
            ContentMode::Standard {
                mature: true,
                challenges: true,
            }
        );
    }

    #[test]
    fn test_parse_mature_only_wins_over_other_flags() {
        let cli = parse(&["--mature-only", "--challenges", "start"]).unwrap();

        assert_eq!(cli.config.content_mode(), ContentMode::MatureOnly);
    }

    #[test]
    fn test_parse_reads_seed_and_paths() {
        let cli = parse(&[
            "next",
            "--seed",
            "42",
            "--state-path",
            "/tmp/s.json",
            "--prompts-path",
            "prompts.yaml",
        ])
        .unwrap();

        assert_eq!(cli.action, Action::Next);
        assert_eq!(cli.config.seed, Some(42));
        assert_eq!(cli.config.state_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(cli.config.prompts_path, Some(PathBuf::from("prompts.yaml")));
    }

    #[test]
    fn test_parse_rejects_bad_seed() {
        assert!(parse(&["next", "--seed", "-1"]).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_action() {
        assert!(parse(&["quit"]).is_err());
    }

    #[test]
    fn test_parse_requires_an_action() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_session_config_carries_rule_overrides() {
        let cli = parse(&["start", "--skip-bonus-interval", "5", "--forfeit-table-turn"]).unwrap();

        let config = cli.config.session_config();

        assert_eq!(config.skip_bonus_interval, 5);
        assert!(config.forfeit_exhausted_table_turn);
    }
}
