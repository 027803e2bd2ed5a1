use hotwirekit_contour::{douglas_peucker, retain_indices, visvalingam, Stop};
use hotwirekit_core::Point2D;
use proptest::prelude::*;

fn distance_to_segment(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(&ab);
    if len2 == 0.0 {
        return p.distance_to(&a);
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    p.distance_to(&(a + ab * t))
}

fn distance_to_chain(p: Point2D, chain: &[Point2D]) -> f64 {
    chain
        .windows(2)
        .map(|w| distance_to_segment(p, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

fn polyline() -> impl Strategy<Value = Vec<Point2D>> {
    prop::collection::vec((0.1f64..5.0, -20.0f64..20.0), 3..80).prop_map(|steps| {
        let mut x = 0.0;
        steps
            .into_iter()
            .map(|(dx, y)| {
                x += dx;
                Point2D::new(x, y)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn discarded_points_stay_within_epsilon(points in polyline(), epsilon in 0.01f64..5.0) {
        let simplified = douglas_peucker(&points, epsilon);
        prop_assert_eq!(simplified.points.first(), points.first());
        prop_assert_eq!(simplified.points.last(), points.last());
        for p in &points {
            prop_assert!(distance_to_chain(*p, &simplified.points) <= epsilon + 1e-9);
        }
    }

    #[test]
    fn paired_sequences_decimate_identically(points in polyline(), target in 2usize..40) {
        let labels: Vec<usize> = (100..100 + points.len()).collect();
        let simplified = visvalingam(&points, Stop::TargetCount(target));
        let paired = retain_indices(&simplified.indices, &labels);

        prop_assert_eq!(paired.len(), simplified.indices.len());
        prop_assert!(simplified.points.len() <= target.max(2));
        for (k, &i) in simplified.indices.iter().enumerate() {
            prop_assert_eq!(paired[k], labels[i]);
            prop_assert_eq!(simplified.points[k], points[i]);
        }
        prop_assert!(simplified.indices.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_douglas_peucker_collapses_straight_runs() {
    let points: Vec<Point2D> = (0..20).map(|i| Point2D::new(i as f64, 2.0 * i as f64)).collect();
    let simplified = douglas_peucker(&points, 1e-6);
    assert_eq!(simplified.indices, vec![0, 19]);
}
