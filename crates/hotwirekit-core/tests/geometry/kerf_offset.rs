use hotwirekit_core::{Curve, Point2D, Profile};
use proptest::prelude::*;

/// Symmetric 4-digit NACA section with cosine spacing
fn naca_symmetric(thickness: f64, chord: f64, samples: usize) -> Profile {
    let half = |sign: f64| {
        let points = (0..=samples)
            .map(|i| {
                let beta = std::f64::consts::PI * i as f64 / samples as f64;
                let x = (1.0 - beta.cos()) / 2.0;
                let yt = 5.0
                    * thickness
                    * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                        - 0.1015 * x.powi(4));
                Point2D::new(x * chord, sign * yt * chord)
            })
            .collect();
        Curve::new(points).unwrap()
    };
    Profile::new("naca", half(1.0), half(-1.0)).unwrap()
}

fn max_deviation(a: &Curve, b: &Curve) -> f64 {
    assert_eq!(a.len(), b.len());
    a.points()
        .iter()
        .zip(b.points())
        .map(|(p, q)| p.distance_to(q))
        .fold(0.0, f64::max)
}

#[test]
fn test_kerf_offset_grows_thickness() {
    let profile = naca_symmetric(0.12, 200.0, 40);
    let cut = profile.offset_around(0.5, 0.5).unwrap();
    let (min, max) = profile.bounds();
    let (cmin, cmax) = cut.bounds();
    assert!((cmax.y - max.y - 0.5).abs() < 0.05);
    assert!((min.y - cmin.y - 0.5).abs() < 0.05);
}

#[test]
fn test_uneven_kerf_per_side() {
    let profile = naca_symmetric(0.12, 200.0, 40);
    let cut = profile.offset_around(0.2, 0.0).unwrap();
    assert_eq!(cut.bottom(), profile.bottom());
    assert_ne!(cut.top(), profile.top());
}

proptest! {
    #[test]
    fn kerf_offset_is_reversible(
        thickness in 0.08f64..0.2,
        chord in 100.0f64..300.0,
        kerf in 0.0f64..0.15,
    ) {
        let profile = naca_symmetric(thickness, chord, 40);
        let back = profile
            .offset_around(kerf, kerf)
            .and_then(|p| p.offset_around(-kerf, -kerf))
            .unwrap();
        prop_assert!(max_deviation(profile.top(), back.top()) < 1e-6);
        prop_assert!(max_deviation(profile.bottom(), back.bottom()) < 1e-6);
    }

    #[test]
    fn arclength_fraction_stays_on_curve_bounds(pct in 0.0f64..=1.0) {
        let profile = naca_symmetric(0.12, 150.0, 30);
        let p = profile.top().point_at_fraction(pct);
        let (min, max) = profile.top().bounds();
        prop_assert!(p.x >= min.x - 1e-9 && p.x <= max.x + 1e-9);
        prop_assert!(p.y >= min.y - 1e-9 && p.y <= max.y + 1e-9);
    }
}
