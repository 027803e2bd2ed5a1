use hotwirekit_settings::{Config, ConfigError, ConfigValue, SettingsPaths};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

const FULL_JOB: &str = r#"
[Project]
Units = "Millimeters"

[RootChord]
Profile = "clarky"
Width = 200.0
Rotation = -1.5
RotationPosition = 0.25

[TipChord]
Profile = "naca2412"
Width = 120.0
LeadingEdgeOffset = 40

[Panel]
RootChordOffset = 50
TipChordSide = "left"
Width = 500
Height = 60
SafeHeight = 150

[Wing]
HorizontalOffset = 10
VerticalOffsetRoot = 20
VerticalAlignProfiles = "dihedral"
Dihedral = 3.0
Inverted = "yes"
RotateWing = true
RotationAnchor = "Leading"
StockLeadingEdge = 5
StockTrailingEdge = 8
TrailingEdgeStockAngle = 12
SheetingTop = 1.5
SheetingBottom = 1.5

[Machine]
Width = 700
Depth = 400
Feedrate = 250
Kerf = [0.8, 1.0]

[Gcode]
InterpolationPoints = 120
ConfigAsComment = "no"
"#;

#[test]
fn test_full_job_file_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("wing.toml");
    fs::write(&path, FULL_JOB).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.text("Project", "Units").unwrap(), "millimeters");
    assert_eq!(config.text("TipChord", "Profile").unwrap(), "naca2412");
    assert_eq!(config.float("RootChord", "Rotation").unwrap(), -1.5);
    assert_eq!(config.float("TipChord", "LeadingEdgeOffset").unwrap(), 40.0);
    assert_eq!(config.text("Panel", "TipChordSide").unwrap(), "left");
    assert_eq!(config.text("Wing", "VerticalAlignProfiles").unwrap(), "dihedral");
    assert_eq!(config.text("Wing", "RotationAnchor").unwrap(), "leading");
    assert!(config.flag("Wing", "Inverted").unwrap());
    assert!(config.flag("Wing", "RotateWing").unwrap());
    assert!(!config.flag("Gcode", "ConfigAsComment").unwrap());
    assert_eq!(config.kerf("Machine", "Kerf").unwrap(), (0.8, 1.0));
    assert_eq!(config.int("Gcode", "InterpolationPoints").unwrap(), 120);
    assert_eq!(config.float("Machine", "Height").unwrap(), 600.0);
    assert_eq!(
        config.get("Gcode", "Axes").unwrap(),
        Some(&ConfigValue::Text("X,Y,Z,A".to_string()))
    );
}

#[test]
fn test_default_job_file_in_config_dir() {
    let temp = TempDir::new().unwrap();
    let paths = SettingsPaths::with_roots(temp.path().join("config"), temp.path().join("cache"));
    paths.ensure_dirs().unwrap();
    fs::write(paths.default_job_file(), FULL_JOB).unwrap();

    let config = paths.load_job(None).unwrap();
    assert_eq!(config.float("Machine", "Width").unwrap(), 700.0);
}

#[test]
fn test_broken_toml_is_not_a_diagnostic_list() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "[Machine\nWidth = 600").unwrap();
    assert!(matches!(Config::load(&path), Err(ConfigError::Toml(_))));
}

#[test]
fn test_empty_file_lists_every_required_key() {
    let err = Config::from_toml_str("").unwrap_err();
    let required = hotwirekit_settings::SCHEMA
        .iter()
        .filter(|k| k.required)
        .count();
    assert_eq!(err.diagnostics().len(), required);
}

proptest! {
    #[test]
    fn prop_kerf_text_keeps_both_sides(left in 0.0f64..5.0, right in 0.0f64..5.0) {
        let text = FULL_JOB.replace(
            "Kerf = [0.8, 1.0]",
            &format!("Kerf = \"{}, {}\"", left, right),
        );
        let config = Config::from_toml_str(&text).unwrap();
        prop_assert_eq!(config.kerf("Machine", "Kerf").unwrap(), (left, right));
    }
}
