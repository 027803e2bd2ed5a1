//! Airfoil profiles
//!
//! A [`Profile`] is one rib cross-section: a top and a bottom [`Curve`] that
//! both run from the leading edge towards the trailing edge. Transforms never
//! mutate; they return a new profile.

use super::curve::Curve;
use super::Point2D;
use crate::error::{GeometryError, Result};
use crate::POINT_TOLERANCE;
use serde::{Deserialize, Serialize};

/// One airfoil cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    name: String,
    top: Curve,
    bottom: Curve,
}

impl Profile {
    /// Build a profile from its two halves.
    ///
    /// Fails with [`GeometryError::DegenerateProfile`] when the leading and
    /// trailing edge midpoints coincide (zero chord).
    pub fn new(name: impl Into<String>, top: Curve, bottom: Curve) -> Result<Self> {
        let profile = Self {
            name: name.into(),
            top,
            bottom,
        };
        let chord = profile.chord();
        if !(chord > POINT_TOLERANCE) {
            return Err(GeometryError::degenerate_profile(
                profile.name,
                format!("chord length {} is too small", chord),
            ));
        }
        Ok(profile)
    }

    /// Parse canonical profile text (Selig layout).
    ///
    /// The first line is the label unless it already holds two numbers.
    /// Rows run from the trailing edge over the top to the leading edge and
    /// back along the bottom; the profile is split at the minimum-x row.
    /// A bottom that stops short of the trailing edge is closed onto it.
    pub fn from_selig(text: &str) -> Result<Self> {
        let mut name = String::new();
        let mut rows: Vec<Point2D> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            match parse_row(line) {
                Some(p) => rows.push(p),
                None if rows.is_empty() && name.is_empty() && idx == 0 => {
                    name = line.to_string();
                }
                None => {
                    return Err(GeometryError::ProfileParse {
                        line: idx + 1,
                        reason: format!("expected two numbers, found '{}'", line),
                    })
                }
            }
        }

        if rows.len() < 3 {
            return Err(GeometryError::degenerate_profile(
                name,
                format!("need at least 3 coordinate rows, got {}", rows.len()),
            ));
        }

        // first occurrence of the minimum x is the leading edge
        let le = rows
            .iter()
            .enumerate()
            .fold(0, |best, (i, p)| if p.x < rows[best].x { i } else { best });

        if le == 0 || le == rows.len() - 1 {
            return Err(GeometryError::degenerate_profile(
                name,
                "leading edge is at the end of the coordinate list",
            ));
        }

        let mut top: Vec<Point2D> = rows[..=le].to_vec();
        top.reverse();
        let mut bottom: Vec<Point2D> = rows[le..].to_vec();
        close_trailing_edge(&top, &mut bottom);

        let top = Curve::new(top).map_err(|e| as_profile_error(&name, "top", e))?;
        let bottom = Curve::new(bottom).map_err(|e| as_profile_error(&name, "bottom", e))?;

        tracing::debug!(
            name = %name,
            top = top.len(),
            bottom = bottom.len(),
            "parsed profile"
        );

        Self::new(name, top, bottom)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn top(&self) -> &Curve {
        &self.top
    }

    pub fn bottom(&self) -> &Curve {
        &self.bottom
    }

    /// Leading-edge boundary point shared by both curves
    pub fn left_midpoint(&self) -> Point2D {
        self.top.first().midpoint(&self.bottom.first())
    }

    /// Trailing-edge boundary point shared by both curves
    pub fn right_midpoint(&self) -> Point2D {
        self.top.last().midpoint(&self.bottom.last())
    }

    pub fn chord(&self) -> f64 {
        self.left_midpoint().distance_to(&self.right_midpoint())
    }

    /// Combined bounds of both curves as `(min, max)`
    pub fn bounds(&self) -> (Point2D, Point2D) {
        let (tmin, tmax) = self.top.bounds();
        let (bmin, bmax) = self.bottom.bounds();
        (
            Point2D::new(tmin.x.min(bmin.x), tmin.y.min(bmin.y)),
            Point2D::new(tmax.x.max(bmax.x), tmax.y.max(bmax.y)),
        )
    }

    /// Offset the top curve up and the bottom curve down.
    ///
    /// Negative values move the curve inward.
    pub fn offset_around(&self, top: f64, bottom: f64) -> Result<Profile> {
        Ok(Profile {
            name: self.name.clone(),
            top: self.top.offset(top)?,
            bottom: self.bottom.offset(-bottom)?,
        })
    }

    pub fn scaled(&self, factor: f64) -> Result<Profile> {
        self.mapped(|p| p * factor)
    }

    pub fn translated(&self, delta: Point2D) -> Profile {
        Profile {
            name: self.name.clone(),
            top: self.top.translated(delta),
            bottom: self.bottom.translated(delta),
        }
    }

    /// Rotate counter-clockwise by `radians` about `pivot`
    pub fn rotated_about(&self, pivot: Point2D, radians: f64) -> Result<Profile> {
        self.mapped(|p| p.rotated_about(pivot, radians))
    }

    /// Reverse the point order of both curves
    pub fn reversed(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            top: self.top.reversed(),
            bottom: self.bottom.reversed(),
        }
    }

    /// Apply a point map to both curves and re-validate the result
    pub fn mapped<F>(&self, f: F) -> Result<Profile>
    where
        F: Fn(Point2D) -> Point2D,
    {
        let top = self.top.mapped(&f)?;
        let bottom = self.bottom.mapped(&f)?;
        Profile::new(self.name.clone(), top, bottom)
    }
}

/// End `bottom` at the top's trailing edge when its last sample falls short.
///
/// Canonical text writes the trailing edge once, as the first row, so the
/// bottom half read back from it never reaches the trailing edge.
pub fn close_trailing_edge(top: &[Point2D], bottom: &mut Vec<Point2D>) {
    if let (Some(&te), Some(last)) = (top.last(), bottom.last()) {
        if last.x < te.x - POINT_TOLERANCE {
            bottom.push(te);
        }
    }
}

fn parse_row(line: &str) -> Option<Point2D> {
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse::<f64>().ok()?;
    let y = fields.next()?.parse::<f64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Point2D::new(x, y))
}

fn as_profile_error(name: &str, half: &str, err: GeometryError) -> GeometryError {
    match err {
        GeometryError::DegenerateCurve { reason } => {
            GeometryError::degenerate_profile(name, format!("{} curve: {}", half, reason))
        }
        other => other,
    }
}
