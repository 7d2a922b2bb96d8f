//! Shared helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use clap::Parser;
use partygame_cli::config::{Cli, Config};
use tempfile::TempDir;

pub struct Table {
    pub dir: TempDir,
}

impl Table {
    /// A two-player table with six individual prompts at difficulty 1 and
    /// no all-players prompts, so every turn belongs to a real player.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("roster.json"),
            serde_json::json!([
                { "id": "00000000-0000-0000-0000-000000000001", "name": "Ana", "gender": "female", "drink": "beer", "single": true },
                { "id": "00000000-0000-0000-0000-000000000002", "name": "Ben", "gender": "male", "drink": "wine", "single": true }
            ])
            .to_string(),
        )
        .unwrap();

        let mut yaml = String::new();
        for id in 1..=6 {
            yaml.push_str(&format!(
                "- id: {id}\n  question: \"Prompt {id}\"\n  punishment: 2\n  difficulty: 1\n"
            ));
        }
        std::fs::write(dir.path().join("prompts.yaml"), yaml).unwrap();

        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn state_path(&self) -> PathBuf {
        self.path("session.json")
    }

    /// Parses the CLI as a host would call it, pointed at this table's files.
    /// The pool has no all-players prompts, so the table turn is forfeited.
    pub fn config(&self, extra: &[&str]) -> Config {
        let state = path_str(&self.state_path());
        let roster = path_str(&self.path("roster.json"));
        let prompts = path_str(&self.path("prompts.yaml"));
        let mut args = vec![
            "partygame",
            "--state-path",
            state.as_str(),
            "--roster-path",
            roster.as_str(),
            "--prompts-path",
            prompts.as_str(),
            "--seed",
            "7",
            "--forfeit-table-turn",
        ];
        args.extend_from_slice(extra);
        args.push("show");
        Cli::try_parse_from(args).unwrap().config
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
