use hotwirekit::{
    import_profile, CachedProfileSource, Config, DirectoryProfileCache, DirectoryProfileSource,
    ImportOptions, Job, Phase, ProfileCache, Simplification,
};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Closed lens outline, chord 200, drawn y-down as SVG expects
fn lens_svg(extra_paths: &str) -> String {
    let mut d = String::new();
    for i in 0..=20 {
        let t = i as f64 / 20.0;
        let y = 20.0 * (t * (1.0 - t)).sqrt();
        let cmd = if i == 0 { 'M' } else { 'L' };
        write!(d, "{} {} {} ", cmd, 200.0 * t, -y).unwrap();
    }
    for i in (1..20).rev() {
        let t = i as f64 / 20.0;
        let y = -8.0 * (t * (1.0 - t)).sqrt();
        write!(d, "L {} {} ", 200.0 * t, -y).unwrap();
    }
    d.push('Z');
    format!(r#"<svg><path d="{}"/>{}</svg>"#, d, extra_paths)
}

const JOB: &str = r#"
[Project]
Units = "millimeters"

[RootChord]
Profile = "lens"
Width = 220

[TipChord]
Profile = "lens"
Width = 160
LeadingEdgeOffset = 30

[Panel]
RootChordOffset = 40
Width = 450
Height = 60

[Wing]
HorizontalOffset = 5
VerticalOffsetRoot = 30
StockTrailingEdge = 10

[Machine]
Width = 600
Depth = 400
Feedrate = 300
Kerf = "0.6, 0.4"

[Gcode]
InterpolationPoints = 40
"#;

fn write_file(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

#[test]
fn test_imported_drawing_drives_a_job() {
    let temp = TempDir::new().unwrap();
    let drawing = temp.path().join("drawings/lens.svg");
    write_file(&drawing, &lens_svg(""));

    let options = ImportOptions::new("lens")
        .with_simplification(Simplification::Distance { epsilon: 1e-4 });
    let canonical = import_profile(&drawing, &options).unwrap();
    assert_eq!(canonical.leading_edge().x, 0.0);
    write_file(&temp.path().join("profiles/lens.dat"), &canonical.to_selig());

    let job_file = temp.path().join("job.toml");
    write_file(&job_file, JOB);
    let config = Config::load(&job_file).unwrap();

    let cache = DirectoryProfileCache::open(temp.path().join("cache")).unwrap();
    let profiles = CachedProfileSource::new(
        DirectoryProfileSource::new(temp.path().join("profiles")),
        cache,
    );
    let output = Job::from_config(&config, &profiles).unwrap().run().unwrap();

    // both ribs resolved the same profile through one cache entry
    assert_eq!(profiles.cache().keys(), vec!["lens".to_string()]);

    let commands = output.toolpath.commands.commands();
    assert_eq!(commands[0].tags().phase, Phase::InitialMove);
    assert!(commands.iter().any(|c| c.tags().phase == Phase::TailStock));
    assert_eq!(output.toolpath.left_offset, 40.0);

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["controller"]["units"], "millimeters");
    assert_eq!(json["controller"]["feedrate"], 300.0);
    assert_eq!(json["config"]["Machine"]["Kerf"], serde_json::json!([0.6, 0.4]));
}

#[test]
fn test_strict_import_rejects_stray_geometry() {
    let temp = TempDir::new().unwrap();
    let drawing = temp.path().join("stray.svg");
    write_file(&drawing, &lens_svg(r#"<path d="M 500 500 L 520 500"/>"#));

    let lenient = import_profile(&drawing, &ImportOptions::new("lens")).unwrap();
    assert!(lenient.points.len() > 10);

    let strict = import_profile(&drawing, &ImportOptions::new("lens").strict());
    assert!(strict.is_err());
}

#[test]
fn test_area_simplification_caps_the_point_count() {
    let temp = TempDir::new().unwrap();
    let drawing = temp.path().join("lens.svg");
    write_file(&drawing, &lens_svg(""));

    let full = import_profile(&drawing, &ImportOptions::new("lens")).unwrap();
    let reduced = import_profile(
        &drawing,
        &ImportOptions::new("lens").with_simplification(Simplification::Area { target: 16 }),
    )
    .unwrap();
    assert!(reduced.points.len() < full.points.len());
    assert!(reduced.points.len() <= 16);
}

#[test]
fn test_unknown_drawing_format() {
    let temp = TempDir::new().unwrap();
    let drawing = temp.path().join("wing.step");
    write_file(&drawing, "ISO-10303-21;");
    let err = import_profile(&drawing, &ImportOptions::new("wing")).unwrap_err();
    assert!(err.to_string().contains("wing.step"));
}
