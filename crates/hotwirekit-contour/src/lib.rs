//! # HotwireKit Contour
//!
//! Turns drawn geometry into canonical airfoil profiles:
//!
//! - **Readers**: DXF lines/polylines, SVG path data, and previously
//!   generated cutting programs
//! - **Assembler**: greedy nearest-endpoint chain reconstruction with
//!   leftover reporting
//! - **Simplifier**: area-based and distance-based decimation with paired
//!   index output
//! - **Extractor**: unit-chord, leading-edge anchored canonical profile text

pub mod assembler;
pub mod error;
pub mod extractor;
pub mod primitive;
pub mod readers;
pub mod simplify;

pub use assembler::{place, with_origin_bracket, Assembly, ContourAssembler, Placement, StartPoint};
pub use error::{ContourError, ContourResult};
pub use extractor::{extract_profile, read_selig_points, CanonicalProfile};
pub use primitive::PathPrimitive;
pub use readers::drawing::{load_dxf, primitives_from_drawing};
pub use readers::load_primitives;
pub use readers::program::primitives_from_program;
pub use readers::vector::primitives_from_svg;
pub use simplify::{douglas_peucker, retain_indices, visvalingam, Simplified, Stop};
