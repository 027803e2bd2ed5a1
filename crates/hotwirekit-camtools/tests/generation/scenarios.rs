use hotwirekit_camtools::{
    CommandKind, FoamBlock, Machine, Panel, Phase, Placement, Rib, RotationAnchor, Side, Toolpath,
    ToolpathError, ToolpathGenerator, VerticalAlignment,
};
use hotwirekit_core::{Curve, Point2D, Profile};

/// Closed, roughly circular section: top and bottom half circles
fn round_profile(name: &str, chord: f64) -> Profile {
    let r = chord / 2.0;
    let steps = 24;
    let half = |sign: f64| -> Vec<Point2D> {
        (0..=steps)
            .map(|i| {
                let a = std::f64::consts::PI * (1.0 - i as f64 / steps as f64);
                Point2D::new(r + r * a.cos(), sign * r * a.sin())
            })
            .collect()
    };
    Profile::new(
        name,
        Curve::new(half(1.0)).unwrap(),
        Curve::new(half(-1.0)).unwrap(),
    )
    .unwrap()
}

fn machine() -> Machine {
    Machine::new(600.0, 160.0).with_profile_points(40)
}

#[test]
fn test_identical_ribs_cut_identical_columns() {
    let rib = Rib::new(round_profile("round", 120.0));
    let panel = Panel::new(rib.clone(), rib, 400.0, Side::Right);
    let placement = Placement {
        root_offset: 100.0,
        ..Placement::default()
    };
    let toolpath = ToolpathGenerator::new(machine(), panel, FoamBlock::new(80.0))
        .generate(&placement)
        .unwrap();

    let positions = toolpath.commands.positions();
    assert!(!positions.is_empty());
    for (p, _) in positions {
        assert_eq!(p.x, p.u);
        assert_eq!(p.y, p.v);
    }
}

#[test]
fn test_panel_wider_than_machine_emits_nothing() {
    let rib = Rib::new(round_profile("round", 120.0));
    let panel = Panel::new(rib.clone(), rib, 610.0, Side::Right);
    let result = ToolpathGenerator::new(machine(), panel, FoamBlock::new(80.0))
        .generate(&Placement::default());
    assert_eq!(
        result,
        Err(ToolpathError::PanelTooWide {
            panel: 610.0,
            machine: 600.0
        })
    );
}

#[test]
fn test_dihedral_raises_the_tip() {
    let rib = Rib::new(round_profile("round", 120.0));
    let panel = Panel::new(rib.clone(), rib, 500.0, Side::Right);
    let generator = ToolpathGenerator::new(machine(), panel, FoamBlock::new(80.0));
    let expected = 25.0 + 500.0 * 10f64.to_radians().sin();

    let placement = Placement {
        vertical_offset_root: Some(25.0),
        vertical_offset_tip: None,
        alignment: VerticalAlignment::Dihedral { angle_deg: 10.0 },
        ..Placement::default()
    };
    let toolpath = generator.generate(&placement).unwrap();
    assert_eq!(toolpath.vertical_offset_left, 25.0);
    assert!((toolpath.vertical_offset_right - expected).abs() < 1e-9);

    let inverted = generator
        .generate(&Placement {
            inverted: true,
            ..placement
        })
        .unwrap();
    assert!((inverted.vertical_offset_right - (50.0 - expected)).abs() < 1e-9);
}

#[test]
fn test_tip_on_the_left_mirrors_the_layout() {
    let root = Rib::new(round_profile("root", 160.0));
    let tip = Rib::new(round_profile("tip", 100.0));
    let panel = Panel::new(root, tip, 450.0, Side::Left);
    let placement = Placement {
        root_offset: 50.0,
        vertical_offset_root: Some(30.0),
        vertical_offset_tip: Some(45.0),
        ..Placement::default()
    };
    let toolpath = ToolpathGenerator::new(machine(), panel, FoamBlock::new(80.0))
        .generate(&placement)
        .unwrap();

    assert_eq!(toolpath.left_offset, 600.0 - 450.0 - 50.0);
    assert_eq!(toolpath.vertical_offset_left, 45.0);
    assert_eq!(toolpath.vertical_offset_right, 30.0);
    let (min, max) = toolpath.wing_plan.bounds;
    assert_eq!(min.x, 100.0);
    assert_eq!(max.x, 550.0);
}

#[test]
fn test_kerf_widens_the_cut() {
    let rib = Rib::new(round_profile("round", 120.0));
    let panel = Panel::new(rib.clone(), rib, 400.0, Side::Right);
    let plain = ToolpathGenerator::new(machine(), panel.clone(), FoamBlock::new(80.0))
        .generate(&Placement::default())
        .unwrap();
    let kerfed = ToolpathGenerator::new(machine().with_kerf(0.5, 0.5), panel, FoamBlock::new(80.0))
        .generate(&Placement::default())
        .unwrap();

    let vertical_extent = |toolpath: &Toolpath| {
        toolpath
            .commands
            .filtered_positions(&[Phase::Profile], &[CommandKind::Move])
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (p, _)| {
                (lo.min(p.y), hi.max(p.y))
            })
    };
    let (plain_low, plain_high) = vertical_extent(&plain);
    let (kerfed_low, kerfed_high) = vertical_extent(&kerfed);
    // mitred offsets grow slightly at the apex
    assert!((0.5..0.51).contains(&(kerfed_high - plain_high)));
    assert!((0.5..0.51).contains(&(plain_low - kerfed_low)));
}

#[test]
fn test_generation_is_deterministic() {
    let panel = Panel::new(
        Rib::new(round_profile("root", 150.0)),
        Rib::new(round_profile("tip", 90.0)),
        420.0,
        Side::Right,
    );
    let generator = ToolpathGenerator::new(machine(), panel, FoamBlock::new(60.0));
    let first = serde_json::to_string(&generator.generate(&Placement::default()).unwrap()).unwrap();
    let second = serde_json::to_string(&generator.generate(&Placement::default()).unwrap()).unwrap();
    assert_eq!(first, second);
}

/// Swept panel: root chord 200, tip chord 100 with its leading edge set 50
/// back. Once placed, the root runs from `offset` to `offset + 200` and the
/// tip from `offset + 50` to `offset + 150`.
fn rotated_cut(side: Side, anchor: RotationAnchor, offset: f64) -> Toolpath {
    let root = Rib::new(round_profile("root", 200.0));
    let tip = Rib::new(round_profile("tip", 100.0).translated(Point2D::new(50.0, 0.0)));
    let panel = Panel::new(root, tip, 400.0, side);
    let placement = Placement {
        horizontal_offset: offset,
        root_offset: 100.0,
        rotate: Some(anchor),
        ..Placement::default()
    };
    ToolpathGenerator::new(machine(), panel, FoamBlock::new(80.0))
        .generate(&placement)
        .unwrap()
}

/// Chord positions where the wire at `index` crosses the stations of two
/// plan corners
fn crossing(toolpath: &Toolpath, index: usize, left: Point2D, right: Point2D) -> (f64, f64) {
    let faces = toolpath
        .commands
        .project_onto_panel(600.0, left.x, right.x - left.x)
        .unwrap();
    (faces[index].0.x, faces[index].1.x)
}

#[test]
fn test_rotated_moves_follow_the_rotated_plan() {
    let offset = 20.0;
    for side in [Side::Left, Side::Right] {
        for anchor in [RotationAnchor::Trailing, RotationAnchor::Leading] {
            let toolpath = rotated_cut(side, anchor, offset);
            assert!(toolpath.rotation.is_some(), "{:?} {:?}", side, anchor);
            let [left_le, right_le, right_te, left_te] = toolpath.wing_plan.corners;
            let positions = toolpath.commands.positions();

            // the anchored edge of the plan keeps its offset
            match anchor {
                RotationAnchor::Trailing => {
                    assert!((left_te.y.min(right_te.y) - offset).abs() < 1e-6)
                }
                RotationAnchor::Leading => {
                    assert!((left_le.y.max(right_le.y) - (offset + 200.0)).abs() < 1e-6)
                }
            }

            // wire entry on the trailing edge sits on the rotated plan
            let entry = positions
                .iter()
                .rposition(|(_, tags)| tags.phase == Phase::InitialMove && !tags.do_not_normalize)
                .unwrap();
            let (te_left, te_right) = crossing(&toolpath, entry, left_te, right_te);
            assert!((te_left - left_te.y).abs() < 1e-6, "{:?} {:?}", side, anchor);
            assert!((te_right - right_te.y).abs() < 1e-6, "{:?} {:?}", side, anchor);
            if anchor == RotationAnchor::Trailing {
                assert!((te_left.min(te_right) - offset).abs() < 1e-6);
            }

            // leading edge crossover: at the edge, out by the entry offset, back
            let le = (0..positions.len() - 2)
                .find(|&i| {
                    positions[i].1.phase == Phase::Profile
                        && positions[i + 2].1.phase == Phase::Profile
                        && positions[i].0 == positions[i + 2].0
                        && positions[i].0 != positions[i + 1].0
                })
                .unwrap();
            let at_edge = positions[le].0;
            assert!((at_edge.x - at_edge.u).abs() < 1e-6, "{:?} {:?}", side, anchor);
            let (le_left, le_right) = crossing(&toolpath, le, left_le, right_le);
            assert!((le_left - le_right).abs() < 1e-6);
            assert!((le_left - left_le.y).abs() < 1e-6);
            if anchor == RotationAnchor::Leading {
                assert!((le_left - (offset + 200.0)).abs() < 1e-6);
            }
        }
    }
}
