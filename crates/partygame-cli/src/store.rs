//! File-backed inputs and session state.
//!
//! Rosters and prompt pools are read as YAML when the file ends in `.yaml`
//! or `.yml`, and as JSON otherwise. Session state is always JSON.

use std::fs;
use std::path::{Path, PathBuf};

use partygame_session::domain::aggregates::SessionState;
use partygame_session::domain::prompts::PromptRecord;
use partygame_session::domain::roster::RosterEntry;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

fn read(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = read(path)?;
    if is_yaml(path) {
        Ok(serde_yaml::from_str(&raw)?)
    } else {
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Loads a roster file.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be read, or a parse error if it
/// is malformed.
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>, AppError> {
    let roster: Vec<RosterEntry> = load_document(path)?;
    debug!(path = %path.display(), players = roster.len(), "roster loaded");
    Ok(roster)
}

/// Loads a prompt pool file.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be read, or a parse error if it
/// is malformed.
pub fn load_prompts(path: &Path) -> Result<Vec<PromptRecord>, AppError> {
    let prompts: Vec<PromptRecord> = load_document(path)?;
    debug!(path = %path.display(), prompts = prompts.len(), "prompt pool loaded");
    Ok(prompts)
}

/// Loads the saved session.
///
/// # Errors
///
/// Returns `AppError::MissingSession` if nothing is saved at `path`.
pub fn load_state(path: &Path) -> Result<SessionState, AppError> {
    if !path.exists() {
        return Err(AppError::MissingSession(path.to_path_buf()));
    }
    Ok(serde_json::from_str(&read(path)?)?)
}

/// Saves the session, replacing any previous copy.
///
/// The state is written to a sibling temporary file first and then renamed
/// over the target.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be written.
pub fn save_state(path: &Path, state: &SessionState) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(state)?;
    let mut tmp = PathBuf::from(path);
    tmp.as_mut_os_string().push(".tmp");

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| AppError::Io { path, source }
    };
    fs::write(&tmp, json).map_err(io_err(&tmp))?;
    fs::rename(&tmp, path).map_err(io_err(path))?;

    debug!(path = %path.display(), version = state.version, "session saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yaml_matches_extension() {
        assert!(is_yaml(Path::new("prompts.yaml")));
        assert!(is_yaml(Path::new("roster.YML")));
        assert!(!is_yaml(Path::new("roster.json")));
        assert!(!is_yaml(Path::new("roster")));
    }

    #[test]
    fn test_load_state_returns_missing_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        match load_state(&path).unwrap_err() {
            AppError::MissingSession(p) => assert_eq!(p, path),
            other => panic!("expected MissingSession, got {other:?}"),
        }
    }

    #[test]
    fn test_load_roster_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.yaml");
        fs::write(
            &path,
            "- id: 00000000-0000-0000-0000-000000000001\n  name: Ana\n  gender: female\n  drink: wine\n  single: true\n",
        )
        .unwrap();

        let roster = load_roster(&path).unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Ana");
    }

    #[test]
    fn test_load_prompts_reports_path_on_io_error() {
        let path = PathBuf::from("/nonexistent/prompts.json");

        match load_prompts(&path).unwrap_err() {
            AppError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
