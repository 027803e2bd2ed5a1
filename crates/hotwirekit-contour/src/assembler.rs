//! Contour assembler
//!
//! Rebuilds one ordered point chain from an unordered set of primitives by
//! greedy nearest-endpoint matching. Primitives that do not connect to the
//! chain are reported back as leftovers instead of being dropped silently.

use crate::error::{ContourError, ContourResult};
use crate::primitive::PathPrimitive;
use hotwirekit_core::{Point2D, POINT_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Where the traversal begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartPoint {
    /// Start at the last point of the first primitive
    FirstPrimitive,
    /// Walk from the first primitive until nothing connects, and start at
    /// the extremity reached
    #[default]
    Extremity,
}

/// How the assembled chain is positioned
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    /// Bounding box min corner moved to `(x, y)`
    Offset(f64, f64),
    /// Bounding box min corner moved to the origin
    #[default]
    Origin,
}

/// Result of an assembly run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    pub chain: Vec<Point2D>,
    /// Primitives that never connected to the chain
    pub leftovers: Vec<PathPrimitive>,
}

impl Assembly {
    pub fn is_complete(&self) -> bool {
        self.leftovers.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.chain.first(), self.chain.last()) {
            (Some(a), Some(b)) if self.chain.len() > 2 => a.distance_to(b) <= POINT_TOLERANCE,
            _ => false,
        }
    }

    /// Translate the chain according to `placement`
    pub fn placed(&self, placement: Placement) -> Vec<Point2D> {
        place(&self.chain, placement)
    }
}

/// Outcome of looking for a primitive touching a point
#[derive(Debug, Clone, PartialEq)]
enum Adjacency {
    Forward(PathPrimitive),
    Reversed(PathPrimitive),
    NoMatch,
}

/// Primitives not yet consumed, in input order
#[derive(Debug, Clone)]
struct RemainingPool {
    items: Vec<PathPrimitive>,
    tolerance: f64,
}

impl RemainingPool {
    fn new(items: Vec<PathPrimitive>, tolerance: f64) -> Self {
        Self { items, tolerance }
    }

    /// Remove and return the first primitive with an endpoint at `point`,
    /// oriented so it starts there
    fn take_adjacent(&mut self, point: Point2D) -> Adjacency {
        for (i, item) in self.items.iter().enumerate() {
            if item.first().distance_to(&point) < self.tolerance {
                return Adjacency::Forward(self.items.remove(i));
            }
            if item.last().distance_to(&point) < self.tolerance {
                return Adjacency::Reversed(self.items.remove(i).reversed());
            }
        }
        Adjacency::NoMatch
    }

    fn into_inner(self) -> Vec<PathPrimitive> {
        self.items
    }
}

/// Greedy chain reconstruction
#[derive(Debug, Clone, Copy)]
pub struct ContourAssembler {
    tolerance: f64,
    start: StartPoint,
}

impl Default for ContourAssembler {
    fn default() -> Self {
        Self {
            tolerance: POINT_TOLERANCE,
            start: StartPoint::default(),
        }
    }
}

impl ContourAssembler {
    pub fn new(start: StartPoint) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn assemble(&self, primitives: Vec<PathPrimitive>) -> ContourResult<Assembly> {
        let first = primitives
            .first()
            .ok_or_else(|| ContourError::EmptyInput("no primitives to assemble".to_string()))?
            .last();
        let total = primitives.len();

        let start = match self.start {
            StartPoint::FirstPrimitive => first,
            StartPoint::Extremity => {
                let mut dry = RemainingPool::new(primitives.clone(), self.tolerance);
                walk(&mut dry, first, |_| {})
            }
        };

        let mut pool = RemainingPool::new(primitives, self.tolerance);
        let mut chain = Vec::new();
        walk(&mut pool, start, |p| p.emit(&mut chain));

        let leftovers = pool.into_inner();
        if leftovers.is_empty() {
            tracing::debug!(primitives = total, points = chain.len(), "assembled contour");
        } else {
            tracing::warn!(
                consumed = total - leftovers.len(),
                leftovers = leftovers.len(),
                dropped_points = leftovers.iter().map(PathPrimitive::point_count).sum::<usize>(),
                "geometry is disconnected or branches; unmatched primitives were not assembled"
            );
        }

        Ok(Assembly { chain, leftovers })
    }
}

/// Consume connected primitives starting at `from`; returns the last
/// position reached
fn walk<F>(pool: &mut RemainingPool, from: Point2D, mut visit: F) -> Point2D
where
    F: FnMut(&PathPrimitive),
{
    let mut current = from;
    loop {
        let next = match pool.take_adjacent(current) {
            Adjacency::Forward(p) | Adjacency::Reversed(p) => p,
            Adjacency::NoMatch => return current,
        };
        visit(&next);
        current = next.last();
    }
}

/// Translate `chain` so its bounding box min corner lands on the placement
pub fn place(chain: &[Point2D], placement: Placement) -> Vec<Point2D> {
    if chain.is_empty() {
        return Vec::new();
    }
    let min_x = chain.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = chain.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let target = match placement {
        Placement::Offset(x, y) => Point2D::new(x, y),
        Placement::Origin => Point2D::ORIGIN,
    };
    let delta = target - Point2D::new(min_x, min_y);
    chain.iter().map(|p| *p + delta).collect()
}

/// Close the chain and wrap it in return-to-origin points
pub fn with_origin_bracket(chain: &[Point2D]) -> Vec<Point2D> {
    let mut out = Vec::with_capacity(chain.len() + 3);
    out.push(Point2D::ORIGIN);
    out.extend_from_slice(chain);
    if let Some(first) = chain.first() {
        out.push(*first);
    }
    out.push(Point2D::ORIGIN);
    out
}
