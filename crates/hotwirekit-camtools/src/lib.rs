//! # HotwireKit CAM Tools
//!
//! Toolpath synthesis for four-axis hot-wire foam cutters.
//!
//! ## Modules
//!
//! - **Projector**: line/plane intersection carrying a wire position from
//!   the panel faces to the carriage stations
//! - **Model**: machine, rib, panel, foam block and placement parameters
//! - **Commands**: the tagged Move/FastMove/Dwell stream and its analysis
//!   (position imputation, tag filtering, cut bounds)
//! - **Wing plan**: plan-view outline of the panel for bounds checks
//! - **Toolpath**: the trailing-edge-first cutting sequence

pub mod command;
pub mod error;
pub mod model;
pub mod projector;
pub mod toolpath;
pub mod wing_plan;

pub use command::{
    AxisValues, Command, CommandKind, CommandSink, CommandStream, CutBounds, Phase, Position,
    Tags,
};
pub use error::{ToolpathError, ToolpathResult};
pub use model::{
    CutParameters, FoamBlock, Machine, Panel, Placement, Rib, RibBuilder, RotationAnchor, Side,
    VerticalAlignment, DEFAULT_PROFILE_POINTS,
};
pub use projector::{on_station, project_line, project_to_stations};
pub use toolpath::{Toolpath, ToolpathGenerator};
pub use wing_plan::WingPlan;
