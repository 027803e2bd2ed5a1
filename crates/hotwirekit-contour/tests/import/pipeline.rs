use dxf::entities::{Entity, EntityType, Line};
use dxf::{Drawing, Point};
use hotwirekit_contour::{
    extract_profile, load_dxf, load_primitives, primitives_from_program, primitives_from_svg,
    read_selig_points, with_origin_bracket, ContourAssembler, ContourError, Placement,
};
use hotwirekit_core::Point2D;
use std::fmt::Write as _;

/// Lens-shaped section: chord 200 from (50, 20), thickest at 30% chord
fn section_outline() -> Vec<Point2D> {
    let mut outline = Vec::new();
    for i in 0..=20 {
        let t = i as f64 / 20.0;
        let x = 50.0 + 200.0 * t;
        outline.push(Point2D::new(x, 20.0 + 24.0 * (t * (1.0 - t)).sqrt() * (1.0 - t).powf(0.3)));
    }
    for i in (1..20).rev() {
        let t = i as f64 / 20.0;
        let x = 50.0 + 200.0 * t;
        outline.push(Point2D::new(x, 20.0 - 10.0 * (t * (1.0 - t)).sqrt()));
    }
    outline
}

fn line_drawing(outline: &[Point2D]) -> Drawing {
    let mut drawing = Drawing::new();
    // interleave the segment order so the assembler has to search
    let n = outline.len();
    let order = (0..n).step_by(2).chain((1..n).step_by(2));
    for i in order {
        let (a, b) = (outline[i], outline[(i + 1) % n]);
        drawing.add_entity(Entity::new(EntityType::Line(Line::new(
            Point::new(a.x, a.y, 0.0),
            Point::new(b.x, b.y, 0.0),
        ))));
    }
    drawing
}

#[test]
fn test_dxf_file_to_canonical_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("section.dxf");
    line_drawing(&section_outline())
        .save_file(path.to_str().unwrap())
        .unwrap();

    let primitives = load_dxf(&path).unwrap();
    assert_eq!(primitives.len(), section_outline().len());

    let assembly = ContourAssembler::default().assemble(primitives).unwrap();
    assert!(assembly.is_complete());
    assert!(assembly.is_closed());

    let canonical = extract_profile("section", &assembly.chain).unwrap();
    assert_eq!(canonical.leading_edge(), Point2D::ORIGIN);
    assert_eq!(canonical.points[0], Point2D::new(1.0, 0.0));
    // top half listed first
    assert!(canonical.points[canonical.top_len / 2].y > 0.0);
    assert!(canonical.points[canonical.top_len + 2].y < 0.0);

    // extension dispatch reaches the same reader
    assert_eq!(
        load_primitives(&path).unwrap().len(),
        section_outline().len()
    );
}

#[test]
fn test_svg_outline_round_trips_through_canonical_text() {
    // SVG is y-down; draw the section upside down so it reads y-up
    let mut d = String::new();
    for (i, p) in section_outline().iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        write!(d, "{} {} {} ", cmd, p.x, -p.y).unwrap();
    }
    d.push('Z');
    let svg = format!(r#"<svg><path fill="none" d="{}"/></svg>"#, d);

    let assembly = ContourAssembler::default()
        .assemble(primitives_from_svg(&svg).unwrap())
        .unwrap();
    let first = extract_profile("svg section", &assembly.chain).unwrap();

    let (name, points) = read_selig_points(&first.to_selig()).unwrap();
    assert_eq!(name, "svg section");
    let second = extract_profile(&name, &points).unwrap();
    assert_eq!(first.to_selig(), second.to_selig());

    let profile = first.to_profile().unwrap();
    assert!((profile.chord() - 1.0).abs() < 1e-9);
}

#[test]
fn test_generated_program_reimports_to_the_same_chain() {
    let assembly = ContourAssembler::default()
        .assemble(primitives_from_svg(r#"<path d="M 0 0 L 30 -4 L 60 0 L 30 3 Z"/>"#).unwrap())
        .unwrap();
    let placed = assembly.placed(Placement::Offset(5.0, 5.0));

    let mut program = String::from("G21\nG90\nG1 F160.000\nM3 S100\n");
    for p in with_origin_bracket(&placed) {
        writeln!(program, "G1 X{:.4} Y{:.4}", p.x, p.y).unwrap();
    }
    program.push_str("M5\n");

    let reassembled = ContourAssembler::default()
        .assemble(primitives_from_program(&program).unwrap())
        .unwrap();
    assert!(reassembled.is_closed());
    assert_eq!(reassembled.chain.len(), placed.len());
    for p in &placed {
        assert!(reassembled.chain.iter().any(|q| q.distance_to(p) < 1e-4));
    }
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("section.step");
    std::fs::write(&path, "ISO-10303-21;").unwrap();
    assert!(matches!(
        load_primitives(&path),
        Err(ContourError::UnsupportedEntity(_))
    ));
}
