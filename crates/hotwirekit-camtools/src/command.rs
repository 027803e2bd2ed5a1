//! Tagged four-axis command stream
//!
//! The generator appends commands through [`CommandSink`]; the formatter
//! and the visualizer read them back from a [`CommandStream`]. Every motion
//! carries exactly one [`Phase`]; dwells inherit the tags of the motion
//! that precedes them.

use crate::projector::{on_station, project_to_stations};
use hotwirekit_core::{GeometryError, Point2D};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cutting phase a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InitialMove,
    Profile,
    DoneProfile,
    FrontStock,
    TailStock,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::InitialMove,
        Phase::Profile,
        Phase::DoneProfile,
        Phase::FrontStock,
        Phase::TailStock,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Phase::InitialMove => "initial_move",
            Phase::Profile => "profile",
            Phase::DoneProfile => "done_profile",
            Phase::FrontStock => "front_stock",
            Phase::TailStock => "tail_stock",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Semantic labels of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tags {
    pub phase: Phase,
    /// The vertical axes hold a fixed machine height rather than a cut
    /// coordinate; such moves stay out of bounds and normalization math
    pub do_not_normalize: bool,
}

impl Tags {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            do_not_normalize: false,
        }
    }

    /// Tags for a move to a fixed machine height
    pub fn fixed_height(phase: Phase) -> Self {
        Self {
            phase,
            do_not_normalize: true,
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::with_capacity(2);
        if self.do_not_normalize {
            labels.push("do_not_normalize");
        }
        labels.push(self.phase.label());
        labels
    }
}

/// Target values of the four axes; unset axes keep their position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
}

impl AxisValues {
    /// All four axes from the left (`x`, `y`) and right (`u`, `v`) carriage
    pub fn both(left: Point2D, right: Point2D) -> Self {
        Self {
            x: Some(left.x),
            y: Some(left.y),
            u: Some(right.x),
            v: Some(right.y),
        }
    }

    /// Horizontal axes only
    pub fn horizontal(x: f64, u: f64) -> Self {
        Self {
            x: Some(x),
            u: Some(u),
            ..Self::default()
        }
    }

    /// Vertical axes only, both carriages at the same height
    pub fn vertical(height: f64) -> Self {
        Self {
            y: Some(height),
            v: Some(height),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.u.is_none() && self.v.is_none()
    }
}

/// One entry of the command stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Cutting move at feed rate
    Move { data: AxisValues, tags: Tags },
    /// Rapid traverse
    FastMove { data: AxisValues, tags: Tags },
    Dwell { seconds: f64, tags: Tags },
}

/// Command variant without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    Move,
    FastMove,
    Dwell,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Move { .. } => CommandKind::Move,
            Command::FastMove { .. } => CommandKind::FastMove,
            Command::Dwell { .. } => CommandKind::Dwell,
        }
    }

    pub fn tags(&self) -> Tags {
        match self {
            Command::Move { tags, .. }
            | Command::FastMove { tags, .. }
            | Command::Dwell { tags, .. } => *tags,
        }
    }

    /// Axis targets of a motion; `None` for dwells
    pub fn axes(&self) -> Option<&AxisValues> {
        match self {
            Command::Move { data, .. } | Command::FastMove { data, .. } => Some(data),
            Command::Dwell { .. } => None,
        }
    }

    pub fn is_motion(&self) -> bool {
        self.axes().is_some()
    }
}

/// Destination of generated commands
pub trait CommandSink {
    fn move_to(&mut self, data: AxisValues, tags: Tags);
    fn fast_move(&mut self, data: AxisValues, tags: Tags);
    /// Pause; tagged like the motion before it
    fn dwell(&mut self, seconds: f64);
}

/// Absolute position of all four axes after a motion
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub u: f64,
    pub v: f64,
}

impl Position {
    pub fn left(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn right(&self) -> Point2D {
        Point2D::new(self.u, self.v)
    }
}

/// Axis-aligned bounds of both carriages' cutting positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutBounds {
    pub min: Point2D,
    pub max: Point2D,
}

/// Append-only command list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandStream {
    commands: Vec<Command>,
}

impl CommandSink for CommandStream {
    fn move_to(&mut self, data: AxisValues, tags: Tags) {
        self.commands.push(Command::Move { data, tags });
    }

    fn fast_move(&mut self, data: AxisValues, tags: Tags) {
        self.commands.push(Command::FastMove { data, tags });
    }

    fn dwell(&mut self, seconds: f64) {
        let tags = self
            .commands
            .iter()
            .rev()
            .find(|c| c.is_motion())
            .map(Command::tags)
            .unwrap_or_else(|| Tags::new(Phase::InitialMove));
        self.commands.push(Command::Dwell { seconds, tags });
    }
}

impl CommandStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn into_inner(self) -> Vec<Command> {
        self.commands
    }

    /// Absolute position after every motion, in stream order
    ///
    /// An axis a motion leaves unset keeps its previous value, or 0 before
    /// the first value.
    pub fn positions(&self) -> Vec<(Position, Tags)> {
        let mut current = Position::default();
        self.commands
            .iter()
            .filter_map(|c| {
                let data = c.axes()?;
                current = Position {
                    x: data.x.unwrap_or(current.x),
                    y: data.y.unwrap_or(current.y),
                    u: data.u.unwrap_or(current.u),
                    v: data.v.unwrap_or(current.v),
                };
                Some((current, c.tags()))
            })
            .collect()
    }

    /// Positions of the motions whose kind and phase are both listed
    pub fn filtered_positions(
        &self,
        phases: &[Phase],
        kinds: &[CommandKind],
    ) -> Vec<(Position, Tags)> {
        let kinds_of_motions = self.commands.iter().filter(|c| c.is_motion()).map(Command::kind);
        self.positions()
            .into_iter()
            .zip(kinds_of_motions)
            .filter(|((_, tags), kind)| phases.contains(&tags.phase) && kinds.contains(kind))
            .map(|(entry, _)| entry)
            .collect()
    }

    /// Bounds over both carriages, skipping fixed-height moves
    pub fn cut_bounds(&self) -> Option<CutBounds> {
        let mut points = self
            .positions()
            .into_iter()
            .filter(|(_, tags)| !tags.do_not_normalize)
            .flat_map(|(p, _)| [p.left(), p.right()]);

        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point2D::new(min.x.min(p.x), min.y.min(p.y)),
                Point2D::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(CutBounds { min, max })
    }

    /// Carry machine positions back onto the two faces of the panel
    ///
    /// `x`/`y` sit on station 0 and `u`/`v` on `machine_width`; the result
    /// holds the wire's crossing of the left and right panel faces.
    pub fn project_onto_panel(
        &self,
        machine_width: f64,
        left_offset: f64,
        panel_width: f64,
    ) -> Result<Vec<(Point2D, Point2D)>, GeometryError> {
        self.positions()
            .iter()
            .map(|(p, _)| {
                project_to_stations(
                    &on_station(0.0, p.left()),
                    &on_station(machine_width, p.right()),
                    left_offset,
                    left_offset + panel_width,
                )
            })
            .collect()
    }
}
