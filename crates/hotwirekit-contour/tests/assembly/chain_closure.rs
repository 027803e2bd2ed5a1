use hotwirekit_contour::{ContourAssembler, PathPrimitive, StartPoint};
use hotwirekit_core::Point2D;
use proptest::prelude::*;

/// Edges of a star-shaped polygon, each as a line or a two-point polyline,
/// randomly reversed
fn polygon_edges() -> impl Strategy<Value = Vec<PathPrimitive>> {
    (3usize..40)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(1.0f64..10.0, n),
                prop::collection::vec(any::<(bool, bool)>(), n),
            )
        })
        .prop_map(|(radii, styles)| {
            let n = radii.len();
            let vertex = |i: usize| {
                let angle = std::f64::consts::TAU * (i % n) as f64 / n as f64;
                Point2D::new(radii[i % n] * angle.cos(), radii[i % n] * angle.sin())
            };
            styles
                .iter()
                .enumerate()
                .map(|(i, &(flip, as_polyline))| {
                    let (a, b) = if flip {
                        (vertex(i + 1), vertex(i))
                    } else {
                        (vertex(i), vertex(i + 1))
                    };
                    if as_polyline {
                        PathPrimitive::Polyline { points: vec![a, b] }
                    } else {
                        PathPrimitive::Line { start: a, end: b }
                    }
                })
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|edges| Just(edges).prop_shuffle())
}

proptest! {
    #[test]
    fn single_cycle_is_fully_consumed(edges in polygon_edges()) {
        let n = edges.len();
        for start in [StartPoint::Extremity, StartPoint::FirstPrimitive] {
            let assembly = ContourAssembler::new(start).assemble(edges.clone()).unwrap();
            prop_assert!(assembly.is_complete());
            prop_assert!(assembly.is_closed());
            prop_assert_eq!(assembly.chain.len(), n + 1);
        }
    }

    #[test]
    fn extra_component_is_reported(edges in polygon_edges()) {
        let mut edges = edges;
        edges.push(PathPrimitive::line((100.0, 100.0), (101.0, 100.0)));
        let assembly = ContourAssembler::default().assemble(edges).unwrap();
        prop_assert_eq!(assembly.leftovers.len(), 1);
        prop_assert!(assembly.is_closed());
    }
}
