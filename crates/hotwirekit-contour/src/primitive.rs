//! Drawing primitives fed to the contour assembler

use hotwirekit_core::{Point2D, POINT_TOLERANCE};
use serde::{Deserialize, Serialize};

/// One piece of drawn geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathPrimitive {
    /// Straight segment
    Line { start: Point2D, end: Point2D },
    /// Open polyline with at least one point
    Polyline { points: Vec<Point2D> },
}

impl PathPrimitive {
    pub fn line(start: impl Into<Point2D>, end: impl Into<Point2D>) -> Self {
        Self::Line {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Build a polyline, `None` when `points` is empty
    pub fn polyline(points: Vec<Point2D>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self::Polyline { points })
        }
    }

    pub fn first(&self) -> Point2D {
        match self {
            Self::Line { start, .. } => *start,
            Self::Polyline { points } => points.first().copied().unwrap_or_default(),
        }
    }

    pub fn last(&self) -> Point2D {
        match self {
            Self::Line { end, .. } => *end,
            Self::Polyline { points } => points.last().copied().unwrap_or_default(),
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Self::Line { start, end } => Self::Line {
                start: *end,
                end: *start,
            },
            Self::Polyline { points } => Self::Polyline {
                points: points.iter().rev().copied().collect(),
            },
        }
    }

    /// Append this primitive's points, skipping a leading point that
    /// repeats the tail of `chain`
    pub fn emit(&self, chain: &mut Vec<Point2D>) {
        let mut push = |p: Point2D| {
            if chain
                .last()
                .is_some_and(|tail| tail.distance_to(&p) <= POINT_TOLERANCE)
            {
                return;
            }
            chain.push(p);
        };
        match self {
            Self::Line { start, end } => {
                push(*start);
                push(*end);
            }
            Self::Polyline { points } => points.iter().copied().for_each(push),
        }
    }

    pub fn point_count(&self) -> usize {
        match self {
            Self::Line { .. } => 2,
            Self::Polyline { points } => points.len(),
        }
    }
}
