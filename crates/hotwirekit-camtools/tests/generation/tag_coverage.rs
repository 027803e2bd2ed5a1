use hotwirekit_camtools::{
    Command, FoamBlock, Machine, Panel, Phase, Placement, Rib, RotationAnchor, Side,
    ToolpathGenerator,
};
use hotwirekit_core::{Curve, Point2D, Profile};
use proptest::prelude::*;

fn wedge(chord: f64, thickness: f64) -> Profile {
    let top = Curve::new(vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(0.3 * chord, thickness),
        Point2D::new(chord, 0.0),
    ])
    .unwrap();
    let bottom = Curve::new(vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(0.4 * chord, -0.3 * thickness),
        Point2D::new(chord, 0.0),
    ])
    .unwrap();
    Profile::new("wedge", top, bottom).unwrap()
}

fn assert_tags_well_formed(commands: &[Command]) {
    let mut previous = None;
    for command in commands {
        match command {
            Command::Move { tags, .. } | Command::FastMove { tags, .. } => {
                assert!(Phase::ALL.contains(&tags.phase));
                previous = Some(*tags);
            }
            Command::Dwell { tags, .. } => {
                if let Some(prev) = previous {
                    assert_eq!(*tags, prev);
                }
            }
        }
    }
}

#[test]
fn test_phases_appear_in_order() {
    let root = Rib::new(wedge(200.0, 20.0)).with_stock(4.0, 6.0);
    let tip = Rib::new(wedge(140.0, 14.0)).with_stock(4.0, 6.0);
    let panel = Panel::new(root, tip, 500.0, Side::Right);
    let toolpath = ToolpathGenerator::new(
        Machine::new(600.0, 160.0).with_profile_points(25),
        panel,
        FoamBlock::new(40.0),
    )
    .generate(&Placement::default())
    .unwrap();

    let commands = toolpath.commands.commands();
    assert_tags_well_formed(commands);

    let mut order: Vec<Phase> = Vec::new();
    for c in commands {
        if order.last() != Some(&c.tags().phase) {
            order.push(c.tags().phase);
        }
    }
    assert_eq!(
        order,
        vec![
            Phase::InitialMove,
            Phase::Profile,
            Phase::DoneProfile,
            Phase::FrontStock,
            Phase::TailStock
        ]
    );

    // profile moves: both curves plus the edge crossovers and exit
    let profile_moves = commands
        .iter()
        .filter(|c| c.is_motion() && c.tags().phase == Phase::Profile)
        .count();
    assert_eq!(profile_moves, 25 + 1 + 3 + 26 + 2);
}

proptest! {
    #[test]
    fn tags_cover_every_command(
        root_chord in 80.0f64..250.0,
        tip_chord in 60.0f64..250.0,
        sweep in -40.0f64..40.0,
        width in 200.0f64..590.0,
        kerf in 0.0f64..0.3,
        points in 5usize..60,
        rotate in any::<bool>(),
        inverted in any::<bool>(),
    ) {
        let root = Rib::new(wedge(root_chord, root_chord * 0.1));
        let tip = Rib::new(wedge(tip_chord, tip_chord * 0.1).translated(Point2D::new(sweep, 0.0)));
        let panel = Panel::new(root, tip, width, Side::Right);
        let machine = Machine::new(600.0, 160.0)
            .with_kerf(kerf, kerf)
            .with_profile_points(points);
        let placement = Placement {
            horizontal_offset: 20.0,
            inverted,
            rotate: rotate.then_some(RotationAnchor::Leading),
            ..Placement::default()
        };

        let toolpath = ToolpathGenerator::new(machine, panel, FoamBlock::new(50.0))
            .generate(&placement)
            .unwrap();
        assert_tags_well_formed(toolpath.commands.commands());
        prop_assert!(toolpath
            .commands
            .iter()
            .all(|c| c.axes().map_or(true, |a| !a.is_empty())));
    }
}
