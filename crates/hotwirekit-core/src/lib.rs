//! # HotwireKit Core
//!
//! Core types and utilities for HotwireKit.
//! Provides the 2D geometry every other crate builds on (points, curves,
//! airfoil profiles), unit handling, and the profile source/cache
//! capabilities the toolpath engine consumes.

pub mod data;
pub mod error;
pub mod geometry;
pub mod units;

pub use data::profile_library::{
    CachedProfileSource, DirectoryProfileCache, DirectoryProfileSource, MemoryProfileCache,
    ProfileCache, ProfileSource,
};
pub use error::{GeometryError, ProfileSourceError, Result};
pub use geometry::{curve::Curve, profile::close_trailing_edge, profile::Profile, Point2D};
pub use units::Units;

/// Distance under which two points are treated as the same location.
pub const POINT_TOLERANCE: f64 = 1e-9;
