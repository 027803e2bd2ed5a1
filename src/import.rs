//! Drawing import
//!
//! Reads a DXF drawing, an SVG path or a previously generated program,
//! assembles its primitives into one chain, optionally simplifies it and
//! normalizes the result into a canonical profile.

use anyhow::{bail, Context, Result};
use hotwirekit_contour::{
    douglas_peucker, extract_profile, load_primitives, visvalingam, CanonicalProfile,
    ContourAssembler, Stop,
};
use std::path::Path;

/// How the assembled chain is decimated before extraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Simplification {
    /// Area-based, down to a point count
    Area { target: usize },
    /// Distance-based, within a tolerance
    Distance { epsilon: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    pub name: String,
    pub simplify: Option<Simplification>,
    /// Fail instead of warning when primitives are left unconnected
    pub strict: bool,
}

impl ImportOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            simplify: None,
            strict: false,
        }
    }

    pub fn with_simplification(mut self, simplify: Simplification) -> Self {
        self.simplify = Some(simplify);
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Import one drawing file as a canonical profile
pub fn import_profile(path: &Path, options: &ImportOptions) -> Result<CanonicalProfile> {
    let primitives = load_primitives(path)
        .with_context(|| format!("cannot read contour from {}", path.display()))?;
    let assembly = ContourAssembler::default().assemble(primitives)?;

    if !assembly.is_complete() {
        if options.strict {
            bail!(
                "{} primitives in {} do not connect to the contour",
                assembly.leftovers.len(),
                path.display()
            );
        }
        tracing::warn!(
            leftovers = assembly.leftovers.len(),
            path = %path.display(),
            "ignoring unconnected primitives"
        );
    }
    if !assembly.is_closed() {
        tracing::warn!(path = %path.display(), "contour is not closed");
    }

    let chain = match options.simplify {
        None => assembly.chain,
        Some(Simplification::Area { target }) => {
            visvalingam(&assembly.chain, Stop::TargetCount(target)).points
        }
        Some(Simplification::Distance { epsilon }) => {
            douglas_peucker(&assembly.chain, epsilon).points
        }
    };

    let profile = extract_profile(&options.name, &chain)?;
    tracing::info!(
        name = %options.name,
        points = profile.points.len(),
        "imported profile"
    );
    Ok(profile)
}
