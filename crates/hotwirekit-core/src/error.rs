//! Error handling for HotwireKit core
//!
//! Provides the error types shared by every layer:
//! - Geometry errors (degenerate curves/profiles, impossible projections)
//! - Profile source errors (lookup, I/O, parsing of canonical profile text)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised instead of propagating NaN or dividing by zero when the input
/// geometry cannot support the requested operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A curve needs at least two distinct points
    #[error("Degenerate curve: {reason}")]
    DegenerateCurve {
        /// Why the curve is unusable.
        reason: String,
    },

    /// A profile has zero chord or is missing its edge midpoints
    #[error("Degenerate profile '{name}': {reason}")]
    DegenerateProfile {
        /// Profile label (may be empty).
        name: String,
        /// Why the profile is unusable.
        reason: String,
    },

    /// Both points of a projection lie on the same station
    #[error("Cannot project: both points lie on station {station}")]
    ParallelProjection {
        /// Station shared by both points.
        station: f64,
    },

    /// A line of canonical profile text could not be parsed
    #[error("Profile parse error at line {line}: {reason}")]
    ProfileParse {
        /// 1-based line number.
        line: usize,
        /// The reason parsing failed.
        reason: String,
    },
}

impl GeometryError {
    /// Shorthand for a degenerate profile error
    pub fn degenerate_profile(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DegenerateProfile {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a degenerate curve error
    pub fn degenerate_curve(reason: impl Into<String>) -> Self {
        Self::DegenerateCurve {
            reason: reason.into(),
        }
    }
}

/// Profile source error type
///
/// Represents failures of the synchronous profile lookup capability.
#[derive(Error, Debug)]
pub enum ProfileSourceError {
    /// No profile is known under the identifier
    #[error("Profile not found: {identifier}")]
    NotFound {
        /// The identifier that was requested.
        identifier: String,
    },

    /// Profile data was found but is not valid canonical profile text
    #[error("Invalid profile data for '{identifier}': {source}")]
    Parse {
        /// The identifier that was requested.
        identifier: String,
        /// The underlying parse failure.
        #[source]
        source: GeometryError,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using GeometryError
pub type Result<T> = std::result::Result<T, GeometryError>;
