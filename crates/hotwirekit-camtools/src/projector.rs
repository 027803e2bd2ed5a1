//! Line/plane projection between cutting stations
//!
//! Points are `(s, x, y)` where `s` is the position along the axis that
//! separates the two wire carriages. A wire position is the straight line
//! through one point on each face of the panel; the carriages sit on other
//! stations, so every position is carried there by intersecting that line
//! with the plane `s = station`.

use hotwirekit_core::{GeometryError, Point2D, POINT_TOLERANCE};
use nalgebra::{Point3, Vector3};

/// A point of a profile placed on a station
pub fn on_station(station: f64, p: Point2D) -> Point3<f64> {
    Point3::new(station, p.x, p.y)
}

/// Plane coordinates of a projected point
pub fn plane_point(p: &Point3<f64>) -> Point2D {
    Point2D::new(p.y, p.z)
}

/// Where the line through `p1` and `p2` crosses the plane `s = station`
pub fn project_line(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    station: f64,
) -> Result<Point3<f64>, GeometryError> {
    let normal = Vector3::x();
    let direction = p2 - p1;
    let denom = normal.dot(&direction);
    if denom.abs() <= POINT_TOLERANCE {
        return Err(GeometryError::ParallelProjection { station: p1.x });
    }
    let t = normal.dot(&(Vector3::new(station, 0.0, 0.0) - p1.coords)) / denom;
    Ok(p1 + direction * t)
}

/// Project the line through `p1` and `p2` onto two stations at once
pub fn project_to_stations(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    left: f64,
    right: f64,
) -> Result<(Point2D, Point2D), GeometryError> {
    let a = project_line(p1, p2, left)?;
    let b = project_line(p1, p2, right)?;
    Ok((plane_point(&a), plane_point(&b)))
}
