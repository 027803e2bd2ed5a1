//! Error types for the contour crate.
//!
//! Import failures are fatal: no partial chain is returned when any input
//! entity cannot be understood.

use hotwirekit_core::GeometryError;
use std::io;
use thiserror::Error;

/// Errors that can occur while importing or normalizing contours.
#[derive(Error, Debug)]
pub enum ContourError {
    /// A drawing entity kind other than a line or lightweight polyline.
    #[error("Unsupported drawing entity: {0}")]
    UnsupportedEntity(String),

    /// Nothing usable was found in the input.
    #[error("No geometry found: {0}")]
    EmptyInput(String),

    /// The DXF file could not be parsed.
    #[error("DXF parse error: {0}")]
    Dxf(String),

    /// The SVG text could not be parsed.
    #[error("SVG parse error: {0}")]
    Svg(String),

    /// A cutting program line held an unreadable coordinate.
    #[error("Program parse error at line {line}: {reason}")]
    ProgramParse { line: usize, reason: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The assembled chain cannot form a profile.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

/// Result type alias for contour operations.
pub type ContourResult<T> = Result<T, ContourError>;
