//! Error types for the settings crate.
//!
//! Loading a configuration collects every problem it finds before failing,
//! so a single [`ConfigError::Invalid`] carries the full list.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading or reading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file was parsed but one or more values are unusable.
    #[error("Invalid configuration:\n  {}", .0.join("\n  "))]
    Invalid(Vec<String>),

    /// A key with no default was never set.
    #[error("Missing configuration key: [{section}] {key}")]
    MissingKey { section: String, key: String },

    /// The key is not part of the configuration schema.
    #[error("Unknown configuration key: [{section}] {key}")]
    UnknownKey { section: String, key: String },

    /// A value was read back as a different kind than the schema declares.
    #[error("Configuration key [{section}] {key} is not a {expected} value")]
    KindMismatch {
        section: String,
        key: String,
        expected: &'static str,
    },

    /// The file is not valid TOML.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),
}

impl ConfigError {
    pub(crate) fn missing(section: &str, key: &str) -> Self {
        Self::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    pub(crate) fn unknown(section: &str, key: &str) -> Self {
        Self::UnknownKey {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    /// Every diagnostic carried by the error, one per line
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            Self::Invalid(list) => list.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
