//! Trailing-edge-first toolpath generation
//!
//! The wire enters at the trailing edge, follows the top curve to the
//! leading edge, returns along the bottom curve and climbs out. Optional
//! stock cuts follow. Both ribs are interpolated by the same arclength
//! fraction so the wire stays a straight line between matching points.
//!
//! Setup before any command is emitted:
//! - kerf offset of each rib by its carriage's kerf
//! - vertical offsets resolved from the alignment mode
//! - profiles reversed and mirrored so the trailing edge faces the machine
//!   front
//! - optional plan rotation that squares a swept leading edge to the
//!   machine

use crate::command::{AxisValues, CommandSink, CommandStream, Phase, Tags};
use crate::error::{ToolpathError, ToolpathResult};
use crate::model::{FoamBlock, Machine, Panel, Placement, RotationAnchor, Side, VerticalAlignment};
use crate::projector::project_to_stations;
use crate::wing_plan::WingPlan;
use hotwirekit_core::{Point2D, Profile, POINT_TOLERANCE};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A generated cut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toolpath {
    pub commands: CommandStream,
    pub wing_plan: WingPlan,
    /// Distance from the left carriage to the left face of the panel
    pub left_offset: f64,
    pub vertical_offset_left: f64,
    pub vertical_offset_right: f64,
    /// Plan rotation applied to the wing, in radians
    pub rotation: Option<f64>,
}

/// Rigid plan-view transform of `(s, x)` points
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlanRotation {
    pivot: Point2D,
    angle: f64,
    shift: f64,
}

impl PlanRotation {
    fn apply(&self, p: Point2D) -> Point2D {
        let r = p.rotated_about(self.pivot, self.angle);
        Point2D::new(r.x, r.y + self.shift)
    }
}

/// Maps a pair of face points to the four machine axes
#[derive(Debug, Clone, Copy)]
struct StationFrame {
    machine_width: f64,
    left_station: f64,
    right_station: f64,
    rotation: Option<PlanRotation>,
}

impl StationFrame {
    /// Carriage positions for the wire through `left` and `right`
    fn at(&self, left: Point2D, right: Point2D) -> ToolpathResult<(Point2D, Point2D)> {
        let (a, b) = match &self.rotation {
            None => (
                Point2D::new(self.left_station, left.x),
                Point2D::new(self.right_station, right.x),
            ),
            Some(rotation) => (
                rotation.apply(Point2D::new(self.left_station, left.x)),
                rotation.apply(Point2D::new(self.right_station, right.x)),
            ),
        };
        let p1 = Point3::new(a.x, a.y, left.y);
        let p2 = Point3::new(b.x, b.y, right.y);
        Ok(project_to_stations(&p1, &p2, 0.0, self.machine_width)?)
    }

    fn both(&self, left: Point2D, right: Point2D) -> ToolpathResult<AxisValues> {
        let (l, r) = self.at(left, right)?;
        Ok(AxisValues::both(l, r))
    }
}

/// Builds the command stream for one panel on one machine
#[derive(Debug, Clone)]
pub struct ToolpathGenerator {
    machine: Machine,
    panel: Panel,
    block: FoamBlock,
}

impl ToolpathGenerator {
    pub fn new(machine: Machine, panel: Panel, block: FoamBlock) -> Self {
        Self {
            machine,
            panel,
            block,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn generate(&self, placement: &Placement) -> ToolpathResult<Toolpath> {
        self.validate(placement)?;
        let m = &self.machine;
        let width = self.panel.width();
        let left_offset = self.panel.left_offset(m.width, placement.root_offset);

        let left = self
            .panel
            .left_rib()
            .profile()
            .offset_around(m.kerf_left, m.kerf_left)?;
        let right = self
            .panel
            .right_rib()
            .profile()
            .offset_around(m.kerf_right, m.kerf_right)?;

        let mult = if placement.inverted { -1.0 } else { 1.0 };
        let (vertical_left, vertical_right) =
            self.resolve_vertical_offsets(placement, lowest(&left, mult), lowest(&right, mult))?;

        let profile_max = left.right_midpoint().x.max(right.right_midpoint().x);
        let horizontal = placement.horizontal_offset + placement.trailing_edge_offset;
        let place = |profile: &Profile, vertical: f64| {
            profile
                .reversed()
                .mapped(|p| Point2D::new(profile_max - p.x + horizontal, mult * p.y + vertical))
        };
        let left = place(&left, vertical_left)?;
        let right = place(&right, vertical_right)?;

        let mut frame = StationFrame {
            machine_width: m.width,
            left_station: left_offset,
            right_station: left_offset + width,
            rotation: None,
        };
        let plan = WingPlan::from_edges(
            frame.left_station,
            frame.right_station,
            (left.left_midpoint().x, left.right_midpoint().x),
            (right.left_midpoint().x, right.right_midpoint().x),
        );
        if let Some(anchor) = placement.rotate {
            frame.rotation = self.plan_rotation(&plan, anchor);
        }
        let wing_plan = match &frame.rotation {
            Some(rotation) => plan.mapped(|p| rotation.apply(p)),
            None => plan,
        };
        for problem in wing_plan.out_of_bounds(m.width, m.depth) {
            tracing::warn!("{}", problem);
        }

        let mut commands = CommandStream::new();
        let cutter = Cutter {
            frame,
            block: &self.block,
            placement,
            points: m.profile_points,
        };
        cutter.cut_profile(&mut commands, &left, &right)?;

        let front = (
            self.panel.left_rib().front_stock(),
            self.panel.right_rib().front_stock(),
        );
        if front.0 > 0.0 || front.1 > 0.0 {
            let at = (
                left.right_midpoint().x - front.0 + m.kerf_left,
                right.right_midpoint().x - front.1 + m.kerf_right,
            );
            cutter.cut_stock(&mut commands, Phase::FrontStock, at, 0.0)?;
        }

        let tail = (
            self.panel.left_rib().tail_stock(),
            self.panel.right_rib().tail_stock(),
        );
        if tail.0 > 0.0 || tail.1 > 0.0 {
            let at = (
                left.left_midpoint().x + tail.0 - m.kerf_left,
                right.left_midpoint().x + tail.1 - m.kerf_right,
            );
            let lean = self.block.plunge_height()
                * placement.trailing_edge_stock_angle.to_radians().tan();
            cutter.cut_stock(&mut commands, Phase::TailStock, at, lean)?;
        }

        tracing::info!(
            commands = commands.len(),
            units = m.units.label(),
            left_offset,
            vertical_left,
            vertical_right,
            "generated toolpath"
        );

        Ok(Toolpath {
            commands,
            wing_plan,
            left_offset,
            vertical_offset_left: vertical_left,
            vertical_offset_right: vertical_right,
            rotation: frame.rotation.map(|r| r.angle),
        })
    }

    fn validate(&self, placement: &Placement) -> ToolpathResult<()> {
        self.machine.validate()?;
        let width = self.panel.width();
        if !(width > 0.0) {
            return Err(ToolpathError::invalid("panel width", "must be positive"));
        }
        if width > self.machine.width {
            return Err(ToolpathError::PanelTooWide {
                panel: width,
                machine: self.machine.width,
            });
        }
        if !(self.block.height > 0.0) {
            return Err(ToolpathError::invalid("foam height", "must be positive"));
        }
        let left_offset = self.panel.left_offset(self.machine.width, placement.root_offset);
        if left_offset < -POINT_TOLERANCE
            || left_offset + width > self.machine.width + POINT_TOLERANCE
        {
            return Err(ToolpathError::invalid(
                "root offset",
                format!(
                    "panel at {} does not fit on a machine {} wide",
                    left_offset, self.machine.width
                ),
            ));
        }
        Ok(())
    }

    /// Vertical offsets of the left and right ribs
    ///
    /// `lowest_*` are the lowest points of each rib after inversion, before
    /// any offset.
    fn resolve_vertical_offsets(
        &self,
        placement: &Placement,
        lowest_left: f64,
        lowest_right: f64,
    ) -> ToolpathResult<(f64, f64)> {
        let root_is_left = self.panel.root_side() == Side::Left;
        let (left, right) = if root_is_left {
            (placement.vertical_offset_root, placement.vertical_offset_tip)
        } else {
            (placement.vertical_offset_tip, placement.vertical_offset_root)
        };

        let (known, known_is_left) = match (left, right) {
            (Some(l), Some(r)) => return Ok((l, r)),
            (Some(l), None) => (l, true),
            (None, Some(r)) => (r, false),
            (None, None) => {
                return Err(ToolpathError::AmbiguousAlignment(
                    placement.alignment.name().to_string(),
                ))
            }
        };

        let resolved = match placement.alignment {
            VerticalAlignment::Default => (known, known),
            VerticalAlignment::Bottom => {
                if known_is_left {
                    (known, known + lowest_left - lowest_right)
                } else {
                    (known + lowest_right - lowest_left, known)
                }
            }
            VerticalAlignment::Dihedral { angle_deg } => {
                let sign = if placement.inverted { -1.0 } else { 1.0 };
                let rise = sign * self.panel.width() * angle_deg.to_radians().sin();
                // the tip sits `rise` above the root
                let other = if known_is_left == root_is_left {
                    known + rise
                } else {
                    known - rise
                };
                if known_is_left {
                    (known, other)
                } else {
                    (other, known)
                }
            }
        };
        tracing::debug!(
            mode = placement.alignment.name(),
            left = resolved.0,
            right = resolved.1,
            "resolved vertical offsets"
        );
        Ok(resolved)
    }

    /// Rotation squaring the leading edge to the carriage axis, pivoting on
    /// the root's trailing edge
    fn plan_rotation(&self, plan: &WingPlan, anchor: RotationAnchor) -> Option<PlanRotation> {
        let [left_le, right_le, right_te, left_te] = plan.corners;
        let sweep = (right_le - left_le).y.atan2((right_le - left_le).x);
        if sweep.abs() <= POINT_TOLERANCE {
            return None;
        }
        let pivot = match self.panel.root_side() {
            Side::Left => left_te,
            Side::Right => right_te,
        };
        let mut rotation = PlanRotation {
            pivot,
            angle: -sweep,
            shift: 0.0,
        };

        let rotated = plan.mapped(|p| rotation.apply(p));
        let [r_left_le, r_right_le, r_right_te, r_left_te] = rotated.corners;
        rotation.shift = match anchor {
            RotationAnchor::Leading => {
                left_le.y.max(right_le.y) - r_left_le.y.max(r_right_le.y)
            }
            RotationAnchor::Trailing => {
                left_te.y.min(right_te.y) - r_left_te.y.min(r_right_te.y)
            }
        };
        tracing::debug!(
            degrees = rotation.angle.to_degrees(),
            shift = rotation.shift,
            "rotating wing plan"
        );
        Some(rotation)
    }
}

/// Lowest point of a profile once flipped by `mult`
fn lowest(profile: &Profile, mult: f64) -> f64 {
    let (min, max) = profile.bounds();
    if mult < 0.0 {
        -max.y
    } else {
        min.y
    }
}

struct Cutter<'a> {
    frame: StationFrame,
    block: &'a FoamBlock,
    placement: &'a Placement,
    points: usize,
}

impl Cutter<'_> {
    fn cut_profile<S: CommandSink>(
        &self,
        sink: &mut S,
        left: &Profile,
        right: &Profile,
    ) -> ToolpathResult<()> {
        let f = &self.frame;
        let dwell = self.placement.cut.dwell_seconds;
        let lead = Point2D::new(self.placement.cut.entry_offset, 0.0);
        let safe = self.block.safe_height();
        let plunge = self.block.plunge_height();
        let initial = Tags::new(Phase::InitialMove);
        let profile = Tags::new(Phase::Profile);

        sink.fast_move(AxisValues::vertical(safe), Tags::fixed_height(Phase::InitialMove));

        let (entry_l, entry_r) = f.at(left.left_midpoint() - lead, right.left_midpoint() - lead)?;
        sink.fast_move(AxisValues::horizontal(entry_l.x, entry_r.x), initial);
        sink.fast_move(AxisValues::vertical(plunge), Tags::fixed_height(Phase::InitialMove));

        sink.move_to(AxisValues::both(entry_l, entry_r), initial);
        sink.dwell(dwell);
        sink.move_to(f.both(left.left_midpoint(), right.left_midpoint())?, initial);
        sink.dwell(dwell);

        // top curve, trailing edge to leading edge
        let n = self.points;
        sink.dwell(dwell);
        for i in 0..n {
            let pct = i as f64 / n as f64;
            sink.move_to(
                f.both(
                    left.top().point_at_fraction(pct),
                    right.top().point_at_fraction(pct),
                )?,
                profile,
            );
            if i == 0 {
                sink.dwell(dwell);
            }
        }
        sink.move_to(f.both(left.top().last(), right.top().last())?, profile);
        sink.dwell(dwell);

        // around the leading edge
        let le = f.both(left.right_midpoint(), right.right_midpoint())?;
        sink.move_to(le, profile);
        sink.dwell(dwell);
        sink.move_to(
            f.both(left.right_midpoint() + lead, right.right_midpoint() + lead)?,
            profile,
        );
        sink.dwell(dwell);
        sink.move_to(le, profile);

        // bottom curve, leading edge back to trailing edge
        for i in (0..=n).rev() {
            let pct = i as f64 / n as f64;
            sink.move_to(
                f.both(
                    left.bottom().point_at_fraction(pct),
                    right.bottom().point_at_fraction(pct),
                )?,
                profile,
            );
            if i == n {
                sink.dwell(dwell);
            }
        }
        sink.dwell(dwell);

        sink.move_to(f.both(left.left_midpoint(), right.left_midpoint())?, profile);
        sink.move_to(
            f.both(left.left_midpoint() - lead, right.left_midpoint() - lead)?,
            profile,
        );
        sink.dwell(dwell);

        sink.move_to(AxisValues::vertical(plunge), Tags::fixed_height(Phase::DoneProfile));
        sink.dwell(dwell * 2.0);
        sink.fast_move(AxisValues::vertical(safe), Tags::fixed_height(Phase::DoneProfile));
        Ok(())
    }

    /// Vertical chop at face positions `at`; the bottom of the cut is
    /// displaced by `lean` towards the leading edge
    fn cut_stock<S: CommandSink>(
        &self,
        sink: &mut S,
        phase: Phase,
        at: (f64, f64),
        lean: f64,
    ) -> ToolpathResult<()> {
        let plunge = self.block.plunge_height();
        let fixed = Tags::fixed_height(phase);
        let (top_l, top_r) = self
            .frame
            .at(Point2D::new(at.0, 0.0), Point2D::new(at.1, 0.0))?;

        sink.fast_move(AxisValues::horizontal(top_l.x, top_r.x), Tags::new(phase));
        sink.fast_move(AxisValues::vertical(plunge), fixed);
        if lean == 0.0 {
            sink.move_to(AxisValues::vertical(0.0), fixed);
            sink.move_to(AxisValues::vertical(plunge), fixed);
        } else {
            let (bottom_l, bottom_r) = self
                .frame
                .at(Point2D::new(at.0 + lean, 0.0), Point2D::new(at.1 + lean, 0.0))?;
            sink.move_to(
                AxisValues::both(
                    Point2D::new(bottom_l.x, 0.0),
                    Point2D::new(bottom_r.x, 0.0),
                ),
                fixed,
            );
            sink.move_to(
                AxisValues::both(
                    Point2D::new(top_l.x, plunge),
                    Point2D::new(top_r.x, plunge),
                ),
                fixed,
            );
        }
        sink.fast_move(AxisValues::vertical(self.block.safe_height()), fixed);
        Ok(())
    }
}
