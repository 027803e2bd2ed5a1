//! Readers that turn imported files into assembler primitives
//!
//! - [`drawing`]: DXF drawings (lines and lightweight polylines)
//! - [`vector`]: SVG path data, curves sampled into polylines
//! - [`program`]: previously generated cutting programs

pub mod drawing;
pub mod program;
pub mod vector;

use crate::error::{ContourError, ContourResult};
use crate::primitive::PathPrimitive;
use std::fs;
use std::path::Path;

/// Read primitives from a file, choosing the reader by extension
pub fn load_primitives(path: &Path) -> ContourResult<Vec<PathPrimitive>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), ext = %ext, "loading contour source");
    match ext.as_str() {
        "dxf" => drawing::load_dxf(path),
        "svg" => vector::primitives_from_svg(&fs::read_to_string(path)?),
        "gcode" | "nc" | "ngc" | "tap" | "txt" => {
            program::primitives_from_program(&fs::read_to_string(path)?)
        }
        other => Err(ContourError::UnsupportedEntity(format!(
            "file extension '{}'",
            other
        ))),
    }
}
