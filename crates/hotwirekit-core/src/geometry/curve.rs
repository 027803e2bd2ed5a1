//! Ordered polyline curves
//!
//! A [`Curve`] is the unit every profile transform works on. It is immutable:
//! each transform returns a new curve.

use super::Point2D;
use crate::error::{GeometryError, Result};
use crate::POINT_TOLERANCE;
use serde::{Deserialize, Serialize};

/// Upper bound for the mitre scale factor of [`Curve::offset`].
pub const MITER_LIMIT: f64 = 4.0;

/// An ordered sequence of at least two distinct points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    points: Vec<Point2D>,
}

impl Curve {
    /// Build a curve, dropping consecutive duplicate points.
    ///
    /// Fails when fewer than two distinct points remain or a coordinate
    /// is not finite.
    pub fn new(points: Vec<Point2D>) -> Result<Self> {
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(GeometryError::degenerate_curve(format!(
                "non-finite point ({}, {})",
                bad.x, bad.y
            )));
        }

        let mut clean: Vec<Point2D> = Vec::with_capacity(points.len());
        for p in points {
            match clean.last() {
                Some(last) if last.distance_to(&p) <= POINT_TOLERANCE => {}
                _ => clean.push(p),
            }
        }

        if clean.len() < 2 {
            return Err(GeometryError::degenerate_curve(format!(
                "need at least 2 distinct points, got {}",
                clean.len()
            )));
        }

        Ok(Self { points: clean })
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point2D {
        self.points[0]
    }

    pub fn last(&self) -> Point2D {
        self.points[self.points.len() - 1]
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> (Point2D, Point2D) {
        self.points.iter().skip(1).fold(
            (self.points[0], self.points[0]),
            |(min, max), p| {
                (
                    Point2D::new(min.x.min(p.x), min.y.min(p.y)),
                    Point2D::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        )
    }

    /// Cumulative arclength at every point (first entry is 0)
    pub fn arclengths(&self) -> Vec<f64> {
        let mut table = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        table.push(0.0);
        for w in self.points.windows(2) {
            total += w[0].distance_to(&w[1]);
            table.push(total);
        }
        table
    }

    /// Total arclength
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
    }

    /// Point at `pct` of the total arclength, interpolating linearly
    /// between samples. `pct` is clamped to `[0, 1]`.
    pub fn point_at_fraction(&self, pct: f64) -> Point2D {
        let pct = if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 1.0) };
        let table = self.arclengths();
        let total = table[table.len() - 1];
        let target = total * pct;

        // index of the first sample at or beyond the target distance
        let idx = table.partition_point(|&d| d < target);
        if idx == 0 {
            return self.first();
        }
        if idx >= table.len() {
            return self.last();
        }

        let seg_len = table[idx] - table[idx - 1];
        if seg_len <= 0.0 {
            return self.points[idx];
        }
        let t = (target - table[idx - 1]) / seg_len;
        self.points[idx - 1].lerp(&self.points[idx], t)
    }

    pub fn reversed(&self) -> Curve {
        let mut points = self.points.clone();
        points.reverse();
        Curve { points }
    }

    pub fn translated(&self, delta: Point2D) -> Curve {
        Curve {
            points: self.points.iter().map(|p| *p + delta).collect(),
        }
    }

    /// Apply an arbitrary point map
    pub fn mapped<F>(&self, f: F) -> Result<Curve>
    where
        F: Fn(Point2D) -> Point2D,
    {
        Curve::new(self.points.iter().map(|p| f(*p)).collect())
    }

    /// Offset every point by `distance` along the left-hand normal of the
    /// direction of travel (negative values offset to the right).
    ///
    /// Interior points are mitred so offset segments stay parallel to the
    /// originals; the mitre scale is clamped to [`MITER_LIMIT`].
    pub fn offset(&self, distance: f64) -> Result<Curve> {
        if distance == 0.0 {
            return Ok(self.clone());
        }

        let normals: Vec<Point2D> = self
            .points
            .windows(2)
            .map(|w| (w[1] - w[0]).normalized().map(|d| d.perp()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| GeometryError::degenerate_curve("zero-length segment"))?;

        let last = self.points.len() - 1;
        let mut out = Vec::with_capacity(self.points.len());
        for (i, p) in self.points.iter().enumerate() {
            let shift = if i == 0 {
                normals[0] * distance
            } else if i == last {
                normals[last - 1] * distance
            } else {
                let (n1, n2) = (normals[i - 1], normals[i]);
                match (n1 + n2).normalized() {
                    Some(bisector) => {
                        let cos = bisector.dot(&n2);
                        let mut scale = 1.0 / cos;
                        if !(scale.is_finite() && scale <= MITER_LIMIT) {
                            tracing::debug!(index = i, "clamping offset mitre");
                            scale = MITER_LIMIT;
                        }
                        bisector * (distance * scale)
                    }
                    // the path doubles back on itself
                    None => n2 * distance,
                }
            };
            out.push(*p + shift);
        }

        Curve::new(out)
    }
}
