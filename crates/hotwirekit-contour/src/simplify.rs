//! Contour simplification
//!
//! Two interchangeable decimation algorithms that keep the first and last
//! point of the input:
//! - [`visvalingam`]: repeatedly drops the point with the smallest effective
//!   triangle area
//! - [`douglas_peucker`]: recursive maximum-distance splitting with a
//!   distance tolerance
//!
//! Both report the original indices they kept so a paired sequence can be
//! decimated identically with [`retain_indices`].

use hotwirekit_core::Point2D;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// When area-based decimation stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stop {
    /// Keep at most this many points (never fewer than the two endpoints)
    TargetCount(usize),
    /// Stop once every remaining interior point has at least this area
    AreaThreshold(f64),
}

/// Decimated points and the input indices they came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simplified {
    pub points: Vec<Point2D>,
    pub indices: Vec<usize>,
}

impl Simplified {
    fn keep_all(points: &[Point2D]) -> Self {
        Self {
            points: points.to_vec(),
            indices: (0..points.len()).collect(),
        }
    }

    fn from_mask(points: &[Point2D], keep: &[bool]) -> Self {
        let indices: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(i, k)| k.then_some(i))
            .collect();
        Self {
            points: indices.iter().map(|&i| points[i]).collect(),
            indices,
        }
    }

    /// Decimate a paired sequence the same way
    pub fn apply_to<T: Clone>(&self, other: &[T]) -> Vec<T> {
        retain_indices(&self.indices, other)
    }
}

/// Pick `indices` out of `other`; indices past the end are skipped
pub fn retain_indices<T: Clone>(indices: &[usize], other: &[T]) -> Vec<T> {
    indices.iter().filter_map(|&i| other.get(i).cloned()).collect()
}

/// Triangle area at `b` from the included angle (law of cosines)
fn effective_area(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    let ab = a.distance_to(&b);
    let cb = c.distance_to(&b);
    let ac = a.distance_to(&c);
    if ab == 0.0 || cb == 0.0 {
        return 0.0;
    }
    let cos = ((ab * ab + cb * cb - ac * ac) / (2.0 * ab * cb)).clamp(-1.0, 1.0);
    0.5 * ab * cb * cos.acos().sin()
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    area: f64,
    index: usize,
    version: u32,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // reversed so the max-heap pops the smallest area (ties: lowest index)
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .area
            .total_cmp(&self.area)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Area-based iterative decimation
pub fn visvalingam(points: &[Point2D], stop: Stop) -> Simplified {
    let n = points.len();
    if n <= 2 {
        return Simplified::keep_all(points);
    }

    let mut prev: Vec<usize> = (0..n).map(|i| i.saturating_sub(1)).collect();
    let mut next: Vec<usize> = (0..n).map(|i| (i + 1).min(n - 1)).collect();
    let mut keep = vec![true; n];
    let mut version = vec![0u32; n];
    let mut heap = BinaryHeap::with_capacity(n);

    for i in 1..n - 1 {
        heap.push(Candidate {
            area: effective_area(points[i - 1], points[i], points[i + 1]),
            index: i,
            version: 0,
        });
    }

    let mut remaining = n;
    while let Some(candidate) = heap.pop() {
        let i = candidate.index;
        if !keep[i] || candidate.version != version[i] {
            continue;
        }
        let done = match stop {
            Stop::TargetCount(target) => remaining <= target.max(2),
            Stop::AreaThreshold(threshold) => candidate.area >= threshold,
        };
        if done {
            break;
        }

        keep[i] = false;
        remaining -= 1;
        let (p, q) = (prev[i], next[i]);
        next[p] = q;
        prev[q] = p;

        // only the two new neighbours change
        for j in [p, q] {
            if j == 0 || j == n - 1 {
                continue;
            }
            version[j] += 1;
            heap.push(Candidate {
                area: effective_area(points[prev[j]], points[j], points[next[j]]),
                index: j,
                version: version[j],
            });
        }
    }

    tracing::debug!(input = n, output = remaining, "area decimation");
    Simplified::from_mask(points, &keep)
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(&ab);
    if len2 == 0.0 {
        return p.distance_to(&a);
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    p.distance_to(&(a + ab * t))
}

/// Perpendicular-distance recursive decimation
///
/// No discarded point ends up farther than `epsilon` from the simplified
/// chain.
pub fn douglas_peucker(points: &[Point2D], epsilon: f64) -> Simplified {
    let n = points.len();
    if n <= 2 {
        return Simplified::keep_all(points);
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;
    split(points, 0, n - 1, epsilon, &mut keep);

    let result = Simplified::from_mask(points, &keep);
    tracing::debug!(input = n, output = result.points.len(), epsilon, "distance decimation");
    result
}

fn split(points: &[Point2D], first: usize, last: usize, epsilon: f64, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }
    let (a, b) = (points[first], points[last]);
    let (index, distance) = (first + 1..last)
        .map(|i| (i, segment_distance(points[i], a, b)))
        .fold((first, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

    if distance > epsilon {
        keep[index] = true;
        split(points, first, index, epsilon, keep);
        split(points, index, last, epsilon, keep);
    }
}
