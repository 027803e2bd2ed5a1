//! Settings directories
//!
//! Resolves where job files and cached profiles live for the current user.

use crate::config::Config;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "hotwirekit";
const PROFILES_DIR: &str = "profiles";
/// Job file read when none is given explicitly
pub const DEFAULT_JOB_FILE: &str = "job.toml";

/// Per-user configuration and cache locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPaths {
    config_dir: PathBuf,
    cache_dir: PathBuf,
}

impl SettingsPaths {
    /// Platform locations, e.g. `~/.config/hotwirekit` and
    /// `~/.cache/hotwirekit/profiles` on Linux
    pub fn resolve() -> ConfigResult<Self> {
        let config_root = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| ConfigError::ConfigDirectory("no config directory".to_string()))?;
        let cache_root = dirs::cache_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
            .ok_or_else(|| ConfigError::ConfigDirectory("no cache directory".to_string()))?;
        Ok(Self::with_roots(config_root, cache_root))
    }

    /// Locations under explicit roots
    pub fn with_roots(config_root: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_root.into().join(APP_DIR),
            cache_dir: cache_root.into().join(APP_DIR),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn default_job_file(&self) -> PathBuf {
        self.config_dir.join(DEFAULT_JOB_FILE)
    }

    /// Directory backing the on-disk profile cache
    pub fn profile_cache_dir(&self) -> PathBuf {
        self.cache_dir.join(PROFILES_DIR)
    }

    /// Create both directories if they do not exist
    pub fn ensure_dirs(&self) -> ConfigResult<()> {
        for dir in [self.config_dir.clone(), self.profile_cache_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                ConfigError::ConfigDirectory(format!("{}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }

    /// Load `path`, or the default job file when `path` is `None`
    pub fn load_job(&self, path: Option<&Path>) -> ConfigResult<Config> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_job_file());
        tracing::debug!(path = %path.display(), "loading job file");
        Config::load(&path)
    }
}
