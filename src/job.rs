//! Cutting job orchestration
//!
//! Turns a validated [`Config`] into a toolpath: resolves both rib profiles
//! through a [`ProfileSource`], builds the ribs, panel, machine and foam
//! block, and runs the generator.

use anyhow::{bail, Context, Result};
use hotwirekit_camtools::{
    FoamBlock, Machine, Panel, Placement, Rib, RotationAnchor, Side, Toolpath, ToolpathGenerator,
    VerticalAlignment,
};
use hotwirekit_core::{ProfileSource, Units};
use hotwirekit_settings::Config;
use serde::Serialize;

/// Controller settings handed to the external program formatter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSettings {
    pub units: Units,
    pub feedrate: f64,
    /// Controller letters for the x, y, u and v axes
    pub axes: Vec<String>,
    pub wire_on: String,
    pub wire_off: String,
}

/// Everything the generate command writes out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobOutput {
    pub controller: ControllerSettings,
    pub toolpath: Toolpath,
    /// The job configuration, when it should travel with the program
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

/// A fully resolved cutting job
#[derive(Debug, Clone)]
pub struct Job {
    generator: ToolpathGenerator,
    placement: Placement,
    controller: ControllerSettings,
    config_json: Option<serde_json::Value>,
}

impl Job {
    /// Resolve profiles and build the machine model from `config`
    pub fn from_config<S: ProfileSource + ?Sized>(config: &Config, source: &S) -> Result<Self> {
        let units = config
            .text("Project", "Units")?
            .parse::<Units>()
            .map_err(anyhow::Error::msg)?;

        let root = build_rib(config, "RootChord", source)?;
        let tip = build_rib(config, "TipChord", source)?;
        let tip_side = config
            .text("Panel", "TipChordSide")?
            .parse::<Side>()
            .map_err(anyhow::Error::msg)?;
        let panel = Panel::new(root, tip, config.float("Panel", "Width")?, tip_side);

        let points = config.int("Gcode", "InterpolationPoints")?;
        if points < 2 {
            bail!("[Gcode] InterpolationPoints must be at least 2, found {}", points);
        }
        let (kerf_left, kerf_right) = config.kerf("Machine", "Kerf")?;
        let machine = Machine::new(
            config.float("Machine", "Width")?,
            config.float("Machine", "Feedrate")?,
        )
        .with_kerf(kerf_left, kerf_right)
        .with_depth(config.float("Machine", "Depth")?)
        .with_profile_points(points as usize)
        .with_units(units);

        let mut block = FoamBlock::new(config.float("Panel", "Height")?);
        let safe_height = config.float("Panel", "SafeHeight")?;
        if safe_height > 0.0 {
            block = block.with_safe_height(safe_height);
        }

        let placement = placement_from(config)?;
        let controller = ControllerSettings {
            units,
            feedrate: machine.feedrate,
            axes: config
                .text("Gcode", "Axes")?
                .split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
            wire_on: config.text("Gcode", "GcodeWireOn")?.to_string(),
            wire_off: config.text("Gcode", "GcodeWireOff")?.to_string(),
        };
        if controller.axes.len() != 4 {
            bail!(
                "[Gcode] Axes must name four axes, found {:?}",
                controller.axes
            );
        }
        let config_json = config
            .flag("Gcode", "ConfigAsComment")?
            .then(|| config.to_json());

        Ok(Self {
            generator: ToolpathGenerator::new(machine, panel, block),
            placement,
            controller,
            config_json,
        })
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn generator(&self) -> &ToolpathGenerator {
        &self.generator
    }

    pub fn run(&self) -> Result<JobOutput> {
        let toolpath = self
            .generator
            .generate(&self.placement)
            .context("toolpath generation failed")?;
        Ok(JobOutput {
            controller: self.controller.clone(),
            toolpath,
            config: self.config_json.clone(),
        })
    }
}

fn build_rib<S: ProfileSource + ?Sized>(config: &Config, section: &str, source: &S) -> Result<Rib> {
    let name = config.text(section, "Profile")?;
    let canonical = source
        .load_profile(name)
        .with_context(|| format!("cannot load [{}] profile '{}'", section, name))?;

    let rib = Rib::builder(&canonical)
        .chord(config.float(section, "Width")?)
        .rotation(
            config.float(section, "Rotation")?,
            config.float(section, "RotationPosition")?,
        )
        .leading_edge_offset(config.float(section, "LeadingEdgeOffset")?)
        .sheeting(
            config.float("Wing", "SheetingTop")?,
            config.float("Wing", "SheetingBottom")?,
        )
        .stock(
            config.float("Wing", "StockLeadingEdge")?,
            config.float("Wing", "StockTrailingEdge")?,
        )
        .build()
        .with_context(|| format!("cannot build [{}] rib", section))?;
    Ok(rib)
}

fn placement_from(config: &Config) -> Result<Placement> {
    let alignment = match config.text("Wing", "VerticalAlignProfiles")? {
        "bottom" => VerticalAlignment::Bottom,
        "dihedral" => VerticalAlignment::Dihedral {
            angle_deg: config.float("Wing", "Dihedral")?,
        },
        _ => VerticalAlignment::Default,
    };
    let rotate = if config.flag("Wing", "RotateWing")? {
        Some(match config.text("Wing", "RotationAnchor")? {
            "leading" => RotationAnchor::Leading,
            _ => RotationAnchor::Trailing,
        })
    } else {
        None
    };

    Ok(Placement {
        horizontal_offset: config.float("Wing", "HorizontalOffset")?,
        trailing_edge_offset: config.float("Wing", "TrailingEdgeOffset")?,
        root_offset: config.float("Panel", "RootChordOffset")?,
        vertical_offset_root: config.opt_float("Wing", "VerticalOffsetRoot")?,
        vertical_offset_tip: config.opt_float("Wing", "VerticalOffsetTip")?,
        alignment,
        inverted: config.flag("Wing", "Inverted")?,
        rotate,
        trailing_edge_stock_angle: config.float("Wing", "TrailingEdgeStockAngle")?,
        ..Placement::default()
    })
}
