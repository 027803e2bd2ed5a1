//! Airfoil profile extraction
//!
//! Normalizes a closed chain into canonical profile form: leading edge at the
//! origin, unit chord, top half first, and coordinates quantized to the
//! precision of the canonical text format. Running the extractor on its own
//! output gives the same output.

use crate::error::{ContourError, ContourResult};
use hotwirekit_core::{
    close_trailing_edge, Curve, GeometryError, Point2D, Profile, POINT_TOLERANCE,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Decimal places written for chord coordinates
pub const X_DECIMALS: i32 = 5;
/// Decimal places written for thickness coordinates
pub const Y_DECIMALS: i32 = 3;

/// Bias added per index to separate tied chord coordinates. Far below the
/// written precision.
const TIE_NUDGE: f64 = 1e-10;

/// A profile in canonical (Selig) order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalProfile {
    pub name: String,
    /// Trailing edge over the top to the leading edge, then along the
    /// bottom towards the trailing edge
    pub points: Vec<Point2D>,
    /// Number of leading entries of `points` that belong to the top curve
    /// (the leading edge included)
    pub top_len: usize,
}

impl CanonicalProfile {
    /// Canonical text: the label, then one `x y` row per point
    pub fn to_selig(&self) -> String {
        let mut out = String::with_capacity(self.points.len() * 24 + self.name.len() + 1);
        out.push_str(&self.name);
        out.push('\n');
        for p in &self.points {
            // writing into a String cannot fail
            let _ = writeln!(out, "    {:.5}     {:.3}", p.x, p.y);
        }
        out
    }

    pub fn leading_edge(&self) -> Point2D {
        self.points[self.top_len - 1]
    }

    /// Split into top and bottom curves that meet at both edges
    pub fn to_profile(&self) -> ContourResult<Profile> {
        let top: Vec<Point2D> = self.points[..self.top_len].iter().rev().copied().collect();
        let mut bottom = vec![self.leading_edge()];
        bottom.extend_from_slice(&self.points[self.top_len..]);
        close_trailing_edge(&top, &mut bottom);
        Ok(Profile::new(
            self.name.clone(),
            Curve::new(top)?,
            Curve::new(bottom)?,
        )?)
    }
}

/// Normalize a closed chain into a canonical profile
pub fn extract_profile(name: &str, chain: &[Point2D]) -> ContourResult<CanonicalProfile> {
    let degenerate =
        |reason: &str| ContourError::Geometry(GeometryError::degenerate_profile(name, reason));

    let mut pts = dedupe_cyclic(chain.to_vec(), POINT_TOLERANCE);
    if pts.len() < 3 {
        return Err(degenerate("need at least 3 distinct points"));
    }

    roll_to_leading_edge(&mut pts);
    let origin = pts[0];
    pts.iter_mut().for_each(|p| *p = *p - origin);

    let te = argmax_x(&pts);
    if mean_y(&pts[..=te]) < mean_y(&pts[te..]) {
        // bottom came first: walk the loop the other way
        pts.reverse();
        pts.rotate_right(1);
    }

    let chord = pts[argmax_x(&pts)].x;
    if !(chord > POINT_TOLERANCE) {
        return Err(degenerate("zero chord"));
    }
    pts.iter_mut().for_each(|p| *p = quantize(*p * (1.0 / chord)));
    pts = dedupe_cyclic(pts, 0.0);

    // quantization can create new ties at the leading edge
    roll_to_leading_edge(&mut pts);
    let origin = pts[0];
    pts.iter_mut().for_each(|p| *p = quantize(*p - origin));

    let te = argmax_x(&pts);
    if te == 0 || te + 1 >= pts.len() {
        return Err(degenerate("missing top or bottom curve"));
    }

    let mut top: Vec<Point2D> = pts[..=te].to_vec();
    let mut bottom: Vec<Point2D> = pts[te + 1..].iter().rev().copied().collect();
    separate_ties(&mut top);
    separate_ties(&mut bottom);

    let top_len = top.len();
    let mut points: Vec<Point2D> = top.into_iter().rev().collect();
    points.extend(bottom);

    tracing::debug!(
        name,
        points = points.len(),
        top = top_len,
        "extracted canonical profile"
    );

    Ok(CanonicalProfile {
        name: name.to_string(),
        points,
        top_len,
    })
}

/// Read a canonical text back into its label and raw point list
pub fn read_selig_points(text: &str) -> ContourResult<(String, Vec<Point2D>)> {
    let mut name = String::new();
    let mut points = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace().map(str::parse::<f64>);
        match (fields.next(), fields.next(), fields.next()) {
            (Some(Ok(x)), Some(Ok(y)), None) => points.push(Point2D::new(x, y)),
            _ if idx == 0 => name = line.to_string(),
            _ => {
                return Err(GeometryError::ProfileParse {
                    line: idx + 1,
                    reason: format!("expected two numbers, found '{}'", line),
                }
                .into())
            }
        }
    }
    Ok((name, points))
}

fn quantize(p: Point2D) -> Point2D {
    let q = |v: f64, decimals: i32| {
        let scale = 10f64.powi(decimals);
        // + 0.0 folds negative zero
        (v * scale).round() / scale + 0.0
    };
    Point2D::new(q(p.x, X_DECIMALS), q(p.y, Y_DECIMALS))
}

/// Remove consecutive duplicates, treating the sequence as a loop
fn dedupe_cyclic(points: Vec<Point2D>, tolerance: f64) -> Vec<Point2D> {
    let mut out: Vec<Point2D> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|q| q.distance_to(&p) <= tolerance) {
            continue;
        }
        out.push(p);
    }
    while out.len() > 1 && out[0].distance_to(&out[out.len() - 1]) <= tolerance {
        out.pop();
    }
    out
}

/// Rotate so the leading edge (minimum x, then minimum y) comes first
fn roll_to_leading_edge(points: &mut [Point2D]) {
    let le = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    points.rotate_left(le);
}

/// First index of the maximum x
fn argmax_x(points: &[Point2D]) -> usize {
    points
        .iter()
        .enumerate()
        .fold(0, |best, (i, p)| if p.x > points[best].x { i } else { best })
}

fn mean_y(points: &[Point2D]) -> f64 {
    points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64
}

/// Make x strictly increasing across neighbours tied at written precision
fn separate_ties(points: &mut [Point2D]) {
    let resolution = 0.5 * 10f64.powi(-X_DECIMALS);
    for k in 1..points.len() {
        let prev = points[k - 1].x;
        if points[k].x <= prev && prev - points[k].x < resolution {
            points[k].x = prev + TIE_NUDGE;
        }
    }
}
