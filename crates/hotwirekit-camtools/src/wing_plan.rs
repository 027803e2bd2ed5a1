//! Plan view of the panel on the machine bed
//!
//! Corners are `(s, x)` pairs: `s` along the carriage axis, `x` along the
//! chord direction.

use hotwirekit_core::Point2D;
use serde::{Deserialize, Serialize};

/// Plan-view outline of the panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WingPlan {
    /// Left leading edge, right leading edge, right trailing edge, left
    /// trailing edge
    pub corners: [Point2D; 4],
    /// `(min, max)` corner of the axis-aligned bounds
    pub bounds: (Point2D, Point2D),
}

impl WingPlan {
    pub fn new(corners: [Point2D; 4]) -> Self {
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = Point2D::new(min.x.min(c.x), min.y.min(c.y));
            max = Point2D::new(max.x.max(c.x), max.y.max(c.y));
        }
        Self {
            corners,
            bounds: (min, max),
        }
    }

    /// Outline from the edge positions of both faces of the panel
    pub fn from_edges(
        left_station: f64,
        right_station: f64,
        left_edges: (f64, f64),
        right_edges: (f64, f64),
    ) -> Self {
        let (left_te, left_le) = left_edges;
        let (right_te, right_le) = right_edges;
        Self::new([
            Point2D::new(left_station, left_le),
            Point2D::new(right_station, right_le),
            Point2D::new(right_station, right_te),
            Point2D::new(left_station, left_te),
        ])
    }

    pub fn mapped<F>(&self, f: F) -> Self
    where
        F: Fn(Point2D) -> Point2D,
    {
        Self::new(self.corners.map(f))
    }

    /// Human-readable problems with the plan on a machine of the given size
    pub fn out_of_bounds(&self, machine_width: f64, machine_depth: Option<f64>) -> Vec<String> {
        let (min, max) = self.bounds;
        let mut problems = Vec::new();
        if min.x < 0.0 || max.x > machine_width {
            problems.push(format!(
                "wing spans {:.3}..{:.3}, outside the machine width {:.3}",
                min.x, max.x, machine_width
            ));
        }
        if min.y < 0.0 {
            problems.push(format!("wing starts {:.3} behind the machine front", -min.y));
        }
        if let Some(depth) = machine_depth {
            if max.y > depth {
                problems.push(format!(
                    "wing reaches {:.3}, beyond the machine depth {:.3}",
                    max.y, depth
                ));
            }
        }
        problems
    }
}
