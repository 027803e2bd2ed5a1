//! Cutting-program reader
//!
//! Re-imports the plane coordinates of a previously generated program. Only
//! linear cut moves (`G1`) are scanned. The first and last extracted points
//! are the synthetic return-to-origin bracket and are dropped.

use crate::error::{ContourError, ContourResult};
use crate::primitive::PathPrimitive;
use hotwirekit_core::{Point2D, POINT_TOLERANCE};
use regex::Regex;
use std::sync::LazyLock;

static CUT_MOVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^g0?1(?:[^0-9]|$)").expect("invalid move regex"));
static XY_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)x\s*([-+]?\d*\.?\d+(?:[eE][-+]?\d+)?)\s+y\s*([-+]?\d*\.?\d+(?:[eE][-+]?\d+)?)",
    )
    .expect("invalid coordinate regex")
});

/// Extract the `(x, y)` pairs of every cut move
pub fn cut_points(text: &str) -> ContourResult<Vec<Point2D>> {
    let mut points = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if !CUT_MOVE.is_match(line) {
            continue;
        }
        let Some(caps) = XY_PAIR.captures(line) else {
            continue;
        };
        let parse = |s: &str| {
            s.parse::<f64>().map_err(|e| ContourError::ProgramParse {
                line: idx + 1,
                reason: format!("'{}': {}", s, e),
            })
        };
        points.push(Point2D::new(parse(&caps[1])?, parse(&caps[2])?));
    }
    Ok(points)
}

/// Turn a cutting program into primitives, one two-point polyline per
/// consecutive pair of cut moves
pub fn primitives_from_program(text: &str) -> ContourResult<Vec<PathPrimitive>> {
    let points = cut_points(text)?;
    if points.len() < 4 {
        return Err(ContourError::EmptyInput(format!(
            "program has {} cut moves, need at least 4",
            points.len()
        )));
    }

    let inner = &points[1..points.len() - 1];
    let primitives: Vec<PathPrimitive> = inner
        .windows(2)
        .filter(|w| w[0].distance_to(&w[1]) > POINT_TOLERANCE)
        .filter_map(|w| PathPrimitive::polyline(w.to_vec()))
        .collect();

    if primitives.is_empty() {
        return Err(ContourError::EmptyInput(
            "program cut moves do not form any segment".to_string(),
        ));
    }
    tracing::debug!(
        moves = points.len(),
        primitives = primitives.len(),
        "read program primitives"
    );
    Ok(primitives)
}
