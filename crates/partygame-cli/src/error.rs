//! Error types for the CLI host.

use std::path::PathBuf;

use partygame_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the CLI host.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required setting is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// No saved session exists at the configured path.
    #[error("no session found at {0}; run `start` first")]
    MissingSession(PathBuf),

    /// Filesystem error while reading inputs or saving state.
    #[error("io error on {path}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// Malformed JSON input or state.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML input.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The engine rejected the command.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Process exit code for this error: 2 for rejected game actions, 1 for
    /// everything else.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Domain(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_exit_with_two() {
        assert_eq!(AppError::Domain(DomainError::NoSkipsRemaining).exit_code(), 2);
    }

    #[test]
    fn test_config_errors_exit_with_one() {
        assert_eq!(AppError::Config("bad".into()).exit_code(), 1);
    }

    #[test]
    fn test_domain_error_message_is_passed_through() {
        let err = AppError::from(DomainError::ExhaustedPromptPool);

        assert_eq!(err.to_string(), "no eligible prompt remains in the pool");
    }
}
