//! Error types for the toolpath crate.
//!
//! The generator fails fast with a single typed error per call and never
//! hands back a partially emitted command stream.

use hotwirekit_core::GeometryError;
use thiserror::Error;

/// Errors that can occur while generating a toolpath.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolpathError {
    /// The panel does not fit between the machine stations.
    #[error("Panel ({panel}) is wider than the machine ({machine})")]
    PanelTooWide { panel: f64, machine: f64 },

    /// The vertical alignment mode cannot be resolved from the given offsets.
    #[error("Ambiguous vertical alignment: mode '{0}' needs at least one vertical offset")]
    AmbiguousAlignment(String),

    /// A rib profile cannot be cut (zero chord, missing edges).
    #[error("Degenerate profile: {0}")]
    DegenerateProfile(String),

    /// A machine, rib or placement parameter is out of range.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A geometric transform failed.
    #[error("Geometry error: {0}")]
    Geometry(GeometryError),
}

impl From<GeometryError> for ToolpathError {
    /// Profiles or curves that collapse mid-generation surface as
    /// [`ToolpathError::DegenerateProfile`], like those rejected up front.
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::DegenerateProfile { name, reason } => {
                ToolpathError::DegenerateProfile(format!("rib '{}': {}", name, reason))
            }
            GeometryError::DegenerateCurve { reason } => {
                ToolpathError::DegenerateProfile(format!("curve: {}", reason))
            }
            other => ToolpathError::Geometry(other),
        }
    }
}

impl ToolpathError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ToolpathError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for toolpath operations.
pub type ToolpathResult<T> = Result<T, ToolpathError>;
