use hotwirekit_core::{GeometryError, Point2D, Profile};

const CLARK_Y_EXCERPT: &str = "CLARK Y AIRFOIL
    1.00000     0.001
    0.80000     0.040
    0.50000     0.080
    0.20000     0.085
    0.05000     0.050
    0.00000     0.000
    0.05000     -0.025
    0.20000     -0.030
    0.50000     -0.020
    0.80000     -0.010
    1.00000     0.000
";

#[test]
fn test_parse_canonical_text() {
    let profile = Profile::from_selig(CLARK_Y_EXCERPT).unwrap();
    assert_eq!(profile.name(), "CLARK Y AIRFOIL");
    assert_eq!(profile.top().len(), 6);
    assert_eq!(profile.bottom().len(), 6);
    assert_eq!(profile.top().first(), Point2D::new(0.0, 0.0));
    assert_eq!(profile.top().last(), Point2D::new(1.0, 0.001));
    assert_eq!(profile.bottom().last(), Point2D::new(1.0, 0.0));
    assert_eq!(profile.right_midpoint(), Point2D::new(1.0, 0.0005));
}

#[test]
fn test_scaled_profile_keeps_shape() {
    let profile = Profile::from_selig(CLARK_Y_EXCERPT).unwrap();
    let rib = profile.scaled(250.0).unwrap();
    let (min, max) = rib.bounds();
    assert!((max.x - 250.0).abs() < 1e-9);
    assert!((min.y + 7.5).abs() < 1e-9);
    assert!((max.y - 21.25).abs() < 1e-9);
}

#[test]
fn test_blank_lines_are_ignored() {
    let text = CLARK_Y_EXCERPT.replace("0.50000     0.080\n", "0.50000     0.080\n\n");
    assert!(Profile::from_selig(&text).is_ok());
}

#[test]
fn test_trailing_garbage_is_a_parse_error() {
    let text = format!("{}end of data\n", CLARK_Y_EXCERPT);
    match Profile::from_selig(&text) {
        Err(GeometryError::ProfileParse { line, .. }) => assert_eq!(line, 13),
        other => panic!("unexpected result: {:?}", other),
    }
}
