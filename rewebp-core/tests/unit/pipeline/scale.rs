use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn stills_are_never_downscaled() {
    for q in [0.0, 0.05, 0.5, 0.97, 1.0] {
        assert_eq!(scale_factor(false, q), 1.0);
    }
}

#[test]
fn near_maximum_quality_skips_downscaling() {
    assert_eq!(scale_factor(true, 0.98), 1.0);
    assert_eq!(scale_factor(true, 1.0), 1.0);
}

#[test]
fn animated_factor_rises_with_quality_above_the_floor() {
    assert!(close(scale_factor(true, 0.5), 0.55));
    assert!(close(scale_factor(true, 0.9), 0.95));
    assert!(close(scale_factor(true, 0.3), 0.35));
    assert!(close(scale_factor(true, 0.05), 0.35));
}

#[test]
fn target_dimensions_round_and_floor_at_one() {
    assert_eq!(target_dimensions(2000, 1000, 1.0), (2000, 1000));
    assert_eq!(target_dimensions(100, 50, 0.35), (35, 18));
    assert_eq!(target_dimensions(1, 1, 0.35), (1, 1));
    assert_eq!(target_dimensions(3, 2, 0.55), (2, 1));
}
