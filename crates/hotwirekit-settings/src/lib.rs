//! HotwireKit Settings Crate
//!
//! Loads cutting job configuration files against a fixed schema and
//! resolves the per-user configuration and profile cache directories.

pub mod config;
pub mod error;
pub mod persistence;
pub mod schema;

pub use config::Config;
pub use error::{ConfigError, ConfigResult};
pub use persistence::SettingsPaths;
pub use schema::{ConfigKey, ConfigValue, DefaultValue, ValueKind, SCHEMA, SECTIONS};
