//! Machine, rib and panel parameters for a cutting run

use crate::error::{ToolpathError, ToolpathResult};
use hotwirekit_core::{Point2D, Profile, Units};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of interpolation steps along each profile curve
pub const DEFAULT_PROFILE_POINTS: usize = 200;

/// A four-axis hot-wire machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// Distance between the two wire carriages
    pub width: f64,
    /// Travel along the chord direction, when known
    pub depth: Option<f64>,
    /// Kerf radius at the left carriage
    pub kerf_left: f64,
    /// Kerf radius at the right carriage
    pub kerf_right: f64,
    pub feedrate: f64,
    /// Interpolation steps per profile curve
    pub profile_points: usize,
    pub units: Units,
}

impl Machine {
    pub fn new(width: f64, feedrate: f64) -> Self {
        Self {
            width,
            depth: None,
            kerf_left: 0.0,
            kerf_right: 0.0,
            feedrate,
            profile_points: DEFAULT_PROFILE_POINTS,
            units: Units::default(),
        }
    }

    pub fn with_kerf(mut self, left: f64, right: f64) -> Self {
        self.kerf_left = left;
        self.kerf_right = right;
        self
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_profile_points(mut self, points: usize) -> Self {
        self.profile_points = points;
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn validate(&self) -> ToolpathResult<()> {
        if !(self.width > 0.0) {
            return Err(ToolpathError::invalid("machine width", "must be positive"));
        }
        if !(self.feedrate > 0.0) {
            return Err(ToolpathError::invalid("feedrate", "must be positive"));
        }
        if self.profile_points == 0 {
            return Err(ToolpathError::invalid(
                "profile points",
                "need at least one interpolation step",
            ));
        }
        for (name, kerf) in [("kerf left", self.kerf_left), ("kerf right", self.kerf_right)] {
            if !(kerf.is_finite() && kerf >= 0.0) {
                return Err(ToolpathError::invalid(name, "must be zero or positive"));
            }
        }
        Ok(())
    }
}

/// One end section of a panel, in machine units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rib {
    profile: Profile,
    front_stock: f64,
    tail_stock: f64,
}

impl Rib {
    /// A rib cut straight from `profile`, without stock
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            front_stock: 0.0,
            tail_stock: 0.0,
        }
    }

    /// Start building a rib from a unit-chord canonical profile
    pub fn builder(canonical: &Profile) -> RibBuilder {
        RibBuilder::new(canonical.clone())
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Leading-edge stock: the foam is chopped this far in from the leading
    /// edge (`Wing.StockLeadingEdge`)
    pub fn front_stock(&self) -> f64 {
        self.front_stock
    }

    /// Trailing-edge stock: the foam is chopped this far in from the trailing
    /// edge (`Wing.StockTrailingEdge`)
    pub fn tail_stock(&self) -> f64 {
        self.tail_stock
    }

    pub fn with_stock(mut self, front: f64, tail: f64) -> Self {
        self.front_stock = front;
        self.tail_stock = tail;
        self
    }
}

/// Scales, twists and places a canonical profile
#[derive(Debug, Clone)]
pub struct RibBuilder {
    canonical: Profile,
    chord: f64,
    rotation_deg: f64,
    rotation_position: f64,
    leading_edge_offset: f64,
    top_sheet: f64,
    bottom_sheet: f64,
    front_stock: f64,
    tail_stock: f64,
}

impl RibBuilder {
    fn new(canonical: Profile) -> Self {
        Self {
            canonical,
            chord: 1.0,
            rotation_deg: 0.0,
            rotation_position: 0.25,
            leading_edge_offset: 0.0,
            top_sheet: 0.0,
            bottom_sheet: 0.0,
            front_stock: 0.0,
            tail_stock: 0.0,
        }
    }

    pub fn chord(mut self, width: f64) -> Self {
        self.chord = width;
        self
    }

    /// Twist by `degrees` (positive raises the leading edge) about the
    /// chord fraction `position` (0 = leading edge)
    pub fn rotation(mut self, degrees: f64, position: f64) -> Self {
        self.rotation_deg = degrees;
        self.rotation_position = position;
        self
    }

    pub fn leading_edge_offset(mut self, offset: f64) -> Self {
        self.leading_edge_offset = offset;
        self
    }

    /// Sheeting thickness removed from the top and bottom surfaces
    pub fn sheeting(mut self, top: f64, bottom: f64) -> Self {
        self.top_sheet = top;
        self.bottom_sheet = bottom;
        self
    }

    pub fn stock(mut self, front: f64, tail: f64) -> Self {
        self.front_stock = front;
        self.tail_stock = tail;
        self
    }

    pub fn build(self) -> ToolpathResult<Rib> {
        if !(self.chord > 0.0 && self.chord.is_finite()) {
            return Err(ToolpathError::DegenerateProfile(format!(
                "rib '{}' has chord width {}",
                self.canonical.name(),
                self.chord
            )));
        }
        if self.top_sheet < 0.0 || self.bottom_sheet < 0.0 {
            return Err(ToolpathError::invalid("sheeting", "must be zero or positive"));
        }

        let mut profile = self.canonical.scaled(self.chord)?;
        if self.rotation_deg != 0.0 {
            let pivot = profile
                .left_midpoint()
                .lerp(&profile.right_midpoint(), self.rotation_position);
            profile = profile.rotated_about(pivot, -self.rotation_deg.to_radians())?;
        }
        if self.top_sheet > 0.0 || self.bottom_sheet > 0.0 {
            profile = profile.offset_around(-self.top_sheet, -self.bottom_sheet)?;
        }
        let profile = profile.translated(Point2D::new(self.leading_edge_offset, 0.0));

        tracing::debug!(
            name = profile.name(),
            chord = self.chord,
            rotation = self.rotation_deg,
            "built rib"
        );
        Ok(Rib {
            profile,
            front_stock: self.front_stock,
            tail_stock: self.tail_stock,
        })
    }
}

/// A machine side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    #[default]
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(format!("unknown side '{}'", other)),
        }
    }
}

/// Two ribs a fixed span apart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    left_rib: Rib,
    right_rib: Rib,
    width: f64,
    tip_side: Side,
}

impl Panel {
    /// Place the root and tip ribs; the root sits opposite `tip_side`
    pub fn new(root: Rib, tip: Rib, width: f64, tip_side: Side) -> Self {
        let (left_rib, right_rib) = match tip_side {
            Side::Right => (root, tip),
            Side::Left => (tip, root),
        };
        Self {
            left_rib,
            right_rib,
            width,
            tip_side,
        }
    }

    pub fn left_rib(&self) -> &Rib {
        &self.left_rib
    }

    pub fn right_rib(&self) -> &Rib {
        &self.right_rib
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn tip_side(&self) -> Side {
        self.tip_side
    }

    pub fn root_side(&self) -> Side {
        self.tip_side.opposite()
    }

    pub fn root(&self) -> &Rib {
        match self.root_side() {
            Side::Left => &self.left_rib,
            Side::Right => &self.right_rib,
        }
    }

    /// Distance from the left carriage to the left face of the panel, given
    /// the distance from the root's carriage to the root face
    pub fn left_offset(&self, machine_width: f64, root_offset: f64) -> f64 {
        match self.tip_side {
            Side::Right => root_offset,
            Side::Left => machine_width - self.width - root_offset,
        }
    }
}

/// The foam block being cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoamBlock {
    pub height: f64,
    /// Travel height between cuts; twice the block height when unset
    pub safe_height: Option<f64>,
}

impl FoamBlock {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            safe_height: None,
        }
    }

    pub fn with_safe_height(mut self, safe_height: f64) -> Self {
        self.safe_height = Some(safe_height);
        self
    }

    pub fn safe_height(&self) -> f64 {
        match self.safe_height {
            Some(h) if h > 0.0 => h,
            _ => self.height * 2.0,
        }
    }

    /// Height plunges stop at, just above the foam
    pub fn plunge_height(&self) -> f64 {
        self.height * 1.1
    }
}

/// How the vertical offsets of the two ribs are resolved
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum VerticalAlignment {
    /// An unset offset copies the other one
    #[default]
    Default,
    /// Lowest points of both ribs end up level
    Bottom,
    /// The tip is raised by `width · sin(angle)` over the root
    Dihedral { angle_deg: f64 },
}

impl VerticalAlignment {
    pub fn name(&self) -> &'static str {
        match self {
            VerticalAlignment::Default => "default",
            VerticalAlignment::Bottom => "bottom",
            VerticalAlignment::Dihedral { .. } => "dihedral",
        }
    }
}

/// Edge kept in place when the wing is rotated square to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationAnchor {
    Leading,
    #[default]
    Trailing,
}

/// Entry offsets and dwell time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutParameters {
    /// Horizontal lead-in/lead-out distance at each edge
    pub entry_offset: f64,
    pub dwell_seconds: f64,
}

impl Default for CutParameters {
    fn default() -> Self {
        Self {
            entry_offset: 1.0,
            dwell_seconds: 1.0,
        }
    }
}

/// Where and how the panel sits in the foam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Distance from the machine front to the trailing edge
    pub horizontal_offset: f64,
    /// Extra horizontal shift applied to both profiles
    pub trailing_edge_offset: f64,
    /// Distance from the root's carriage to the root face
    pub root_offset: f64,
    pub vertical_offset_root: Option<f64>,
    pub vertical_offset_tip: Option<f64>,
    pub alignment: VerticalAlignment,
    /// Cut upside down
    pub inverted: bool,
    /// Rotate a swept wing square to the machine, anchoring one edge
    pub rotate: Option<RotationAnchor>,
    /// Lean of the tail stock plunge, in degrees
    pub trailing_edge_stock_angle: f64,
    pub cut: CutParameters,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            horizontal_offset: 0.0,
            trailing_edge_offset: 0.0,
            root_offset: 0.0,
            vertical_offset_root: Some(0.0),
            vertical_offset_tip: None,
            alignment: VerticalAlignment::default(),
            inverted: false,
            rotate: None,
            trailing_edge_stock_angle: 0.0,
            cut: CutParameters::default(),
        }
    }
}
