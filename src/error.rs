//! Error types for xftheme.

use std::path::PathBuf;

/// Errors produced by the profile store, the property gateway and the
/// profile state machine.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("{channel} is not a valid channel")]
    InvalidChannel { channel: String },

    #[error("xfconf-query command failed ({command}): {output}")]
    PropertyQueryFailed { command: String, output: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("--{argument} is required for '{action}'")]
    MissingArgument {
        argument: &'static str,
        action: &'static str,
    },

    #[error("invalid profile name '{name}': {reason}")]
    InvalidProfileName { name: String, reason: &'static str },

    #[error("failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config file {path:?}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ThemeError {
    pub(crate) fn query_failed(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self::PropertyQueryFailed {
            command: command.into(),
            output: output.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ThemeError>;
