//! Unit handling
//!
//! Machine and profile dimensions are plain numbers in the project's units.
//! This module names those units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Project length units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Inches (the historical default for hot-wire configs)
    #[default]
    Inches,
    /// Millimeters
    Millimeters,
}

impl Units {
    /// Short label ("in" or "mm")
    pub fn label(self) -> &'static str {
        match self {
            Self::Inches => "in",
            Self::Millimeters => "mm",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inches => write!(f, "inches"),
            Self::Millimeters => write!(f, "millimeters"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inches" | "inch" | "in" => Ok(Self::Inches),
            "millimeters" | "millimetres" | "mm" => Ok(Self::Millimeters),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}
