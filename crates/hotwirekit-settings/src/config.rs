//! Cutting job configuration
//!
//! A job file is TOML with one table per section:
//!
//! ```toml
//! [RootChord]
//! Profile = "clarky"
//! Width = 200
//!
//! [Machine]
//! Width = 600
//! Depth = 300
//! Feedrate = 160
//! Kerf = "0.04, 0.06"
//! ```
//!
//! Keys are checked against [`SCHEMA`](crate::schema::SCHEMA) when the file
//! is loaded. Every problem found is reported at once.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{find_key, find_section, ConfigKey, ConfigValue, ValueKind, SCHEMA};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

type Slot = (&'static str, &'static str);

/// A validated cutting job configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    values: BTreeMap<Slot, ConfigValue>,
    explicit: BTreeSet<Slot>,
}

impl Config {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let table: toml::Table = toml::from_str(text)?;
        let mut diagnostics = Vec::new();
        let mut config = Config::default();
        let mut rejected = BTreeSet::new();

        for (section_name, section) in &table {
            let Some(section_id) = find_section(section_name) else {
                diagnostics.push(format!("unknown section [{}]", section_name));
                continue;
            };
            let toml::Value::Table(entries) = section else {
                diagnostics.push(format!("[{}] must be a table of keys", section_id));
                continue;
            };
            for (key_name, raw) in entries {
                let Some(entry) = find_key(section_id, key_name) else {
                    diagnostics.push(format!("unknown key [{}] {}", section_id, key_name));
                    continue;
                };
                let slot = (entry.section, entry.key);
                if config.explicit.contains(&slot) || rejected.contains(&slot) {
                    diagnostics.push(format!(
                        "[{}] {} is set more than once",
                        entry.section, entry.key
                    ));
                    continue;
                }
                match entry.coerce(raw) {
                    Ok(value) => {
                        config.values.insert(slot, value);
                        config.explicit.insert(slot);
                    }
                    Err(reason) => {
                        rejected.insert(slot);
                        diagnostics.push(format!("[{}] {}: {}", entry.section, entry.key, reason));
                    }
                }
            }
        }

        for entry in SCHEMA {
            let slot = (entry.section, entry.key);
            if config.values.contains_key(&slot) {
                continue;
            }
            if entry.required {
                // a present but malformed key was already reported
                if !rejected.contains(&slot) {
                    diagnostics.push(format!(
                        "missing required key [{}] {}",
                        entry.section, entry.key
                    ));
                }
            } else if let Some(default) = entry.default_value() {
                config.values.insert(slot, default);
            }
        }

        if !diagnostics.is_empty() {
            tracing::debug!(count = diagnostics.len(), "configuration rejected");
            return Err(ConfigError::Invalid(diagnostics));
        }
        tracing::debug!(keys = config.explicit.len(), "configuration loaded");
        Ok(config)
    }

    /// Read and validate a job file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Raw value of a key, `None` when unset with no default
    pub fn get(&self, section: &str, key: &str) -> ConfigResult<Option<&ConfigValue>> {
        let entry = Self::entry(section, key)?;
        Ok(self.values.get(&(entry.section, entry.key)))
    }

    /// Whether the key was written in the file rather than defaulted
    pub fn is_explicit(&self, section: &str, key: &str) -> bool {
        find_key(section, key)
            .map(|e| self.explicit.contains(&(e.section, e.key)))
            .unwrap_or(false)
    }

    pub fn float(&self, section: &str, key: &str) -> ConfigResult<f64> {
        self.opt_float(section, key)?
            .ok_or_else(|| ConfigError::missing(section, key))
    }

    pub fn opt_float(&self, section: &str, key: &str) -> ConfigResult<Option<f64>> {
        let entry = Self::entry(section, key)?;
        match self.values.get(&(entry.section, entry.key)) {
            None => Ok(None),
            Some(ConfigValue::Float(v)) => Ok(Some(*v)),
            Some(_) => Err(mismatch(entry, "float")),
        }
    }

    pub fn int(&self, section: &str, key: &str) -> ConfigResult<i64> {
        let entry = Self::entry(section, key)?;
        match self.values.get(&(entry.section, entry.key)) {
            None => Err(ConfigError::missing(entry.section, entry.key)),
            Some(ConfigValue::Int(v)) => Ok(*v),
            Some(_) => Err(mismatch(entry, "integer")),
        }
    }

    /// Text or choice value; choices are lowercase
    pub fn text(&self, section: &str, key: &str) -> ConfigResult<&str> {
        let entry = Self::entry(section, key)?;
        match self.values.get(&(entry.section, entry.key)) {
            None => Err(ConfigError::missing(entry.section, entry.key)),
            Some(ConfigValue::Text(v)) => Ok(v),
            Some(_) => Err(mismatch(entry, "text")),
        }
    }

    pub fn flag(&self, section: &str, key: &str) -> ConfigResult<bool> {
        let entry = Self::entry(section, key)?;
        match self.values.get(&(entry.section, entry.key)) {
            None => Err(ConfigError::missing(entry.section, entry.key)),
            Some(ConfigValue::Bool(v)) => Ok(*v),
            Some(_) => Err(mismatch(entry, "boolean")),
        }
    }

    /// `(left, right)` kerf
    pub fn kerf(&self, section: &str, key: &str) -> ConfigResult<(f64, f64)> {
        let entry = Self::entry(section, key)?;
        match self.values.get(&(entry.section, entry.key)) {
            None => Err(ConfigError::missing(entry.section, entry.key)),
            Some(ConfigValue::Kerf(l, r)) => Ok((*l, *r)),
            Some(_) => Err(mismatch(entry, ValueKind::Kerf.name())),
        }
    }

    /// All set values as nested JSON, one object per section
    pub fn to_json(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        for entry in SCHEMA {
            let Some(value) = self.values.get(&(entry.section, entry.key)) else {
                continue;
            };
            let section = root
                .entry(entry.section.to_string())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            if let serde_json::Value::Object(map) = section {
                map.insert(
                    entry.key.to_string(),
                    serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
                );
            }
        }
        serde_json::Value::Object(root)
    }

    fn entry(section: &str, key: &str) -> ConfigResult<&'static ConfigKey> {
        find_key(section, key).ok_or_else(|| ConfigError::unknown(section, key))
    }
}

fn mismatch(entry: &ConfigKey, expected: &'static str) -> ConfigError {
    ConfigError::KindMismatch {
        section: entry.section.to_string(),
        key: entry.key.to_string(),
        expected,
    }
}
