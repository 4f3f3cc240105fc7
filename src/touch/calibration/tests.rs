use super::*;

#[test]
fn identity_passes_through_and_clamps() {
    let cal = Calibration::identity(800, 480);
    assert_eq!(cal.apply(TouchSample::new(10, 20)), TouchSample::new(10, 20));
    assert_eq!(
        cal.apply(TouchSample::new(4095, 4095)),
        TouchSample::new(799, 479)
    );
}

#[test]
fn range_maps_extremes_to_screen_edges() {
    let cal = Calibration::from_range((100, 3995), (200, 3900), 800, 480).unwrap();

    assert_eq!(cal.apply(TouchSample::new(100, 200)), TouchSample::new(0, 0));
    assert_eq!(
        cal.apply(TouchSample::new(3995, 3900)),
        TouchSample::new(799, 479)
    );
    let mid = cal.apply(TouchSample::new(2047, 2050));
    assert!((398..=401).contains(&mid.x), "x = {}", mid.x);
    assert!((238..=241).contains(&mid.y), "y = {}", mid.y);
}

#[test]
fn range_below_minimum_clamps_to_zero() {
    let cal = Calibration::from_range((100, 3995), (200, 3900), 800, 480).unwrap();
    assert_eq!(cal.apply(TouchSample::new(0, 0)), TouchSample::new(0, 0));
}

#[test]
fn degenerate_range_is_rejected() {
    assert!(Calibration::from_range((500, 500), (0, 4095), 800, 480).is_none());
    assert!(Calibration::from_range((600, 500), (0, 4095), 800, 480).is_none());
    assert!(Calibration::from_range((0, 4095), (0, 4095), 0, 480).is_none());
}

#[test]
fn three_points_solve_scaling() {
    let raw = [
        TouchSample::new(0, 0),
        TouchSample::new(100, 0),
        TouchSample::new(0, 100),
    ];
    let screen = [
        TouchSample::new(0, 0),
        TouchSample::new(200, 0),
        TouchSample::new(0, 200),
    ];
    let cal = Calibration::from_points(raw, screen, 400, 400).unwrap();

    assert_eq!(cal.a, I16F16::from_num(2));
    assert_eq!(cal.b, I16F16::ZERO);
    assert_eq!(cal.e, I16F16::from_num(2));
    assert_eq!(cal.apply(TouchSample::new(50, 25)), TouchSample::new(100, 50));
}

#[test]
fn three_points_handle_swapped_axes() {
    let raw = [
        TouchSample::new(0, 0),
        TouchSample::new(100, 0),
        TouchSample::new(0, 100),
    ];
    let screen = [
        TouchSample::new(0, 0),
        TouchSample::new(0, 100),
        TouchSample::new(100, 0),
    ];
    let cal = Calibration::from_points(raw, screen, 200, 200).unwrap();
    assert_eq!(cal.apply(TouchSample::new(30, 70)), TouchSample::new(70, 30));
}

#[test]
fn collinear_points_are_rejected() {
    let raw = [
        TouchSample::new(0, 0),
        TouchSample::new(10, 10),
        TouchSample::new(20, 20),
    ];
    let screen = [
        TouchSample::new(0, 0),
        TouchSample::new(100, 0),
        TouchSample::new(0, 100),
    ];
    assert!(Calibration::from_points(raw, screen, 200, 200).is_none());
}
