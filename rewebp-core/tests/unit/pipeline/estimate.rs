use super::*;

fn still(size_bytes: u64) -> Metadata {
    Metadata {
        width: 2000,
        height: 1000,
        frame_count: 1,
        fps: 0.0,
        total_duration_ms: 0.0,
        size_bytes,
        has_animation: false,
        file_name: "still.webp".to_string(),
    }
}

fn animated(size_bytes: u64, fps: f64) -> Metadata {
    Metadata {
        width: 640,
        height: 480,
        frame_count: 60,
        fps,
        total_duration_ms: 2000.0,
        size_bytes,
        has_animation: true,
        file_name: "anim.webp".to_string(),
    }
}

#[test]
fn quality_normalization_has_a_floor() {
    assert_eq!(normalized_quality(1), 0.05);
    assert_eq!(normalized_quality(5), 0.05);
    assert_eq!(normalized_quality(50), 0.5);
    assert_eq!(normalized_quality(100), 1.0);
}

#[test]
fn still_scenario_matches_model() {
    // 2,000,000 bytes at quality 80: max(240000, 2000000 * 0.83 * 1).
    let estimate = estimate_size(&still(2_000_000), &Settings { fps: 24, quality: 80 });
    assert!((estimate - 1_660_000.0).abs() < 1.0);
}

#[test]
fn animated_scenario_matches_model() {
    // 10,000,000 bytes, 30 -> 10 fps at quality 50: max(800000, 2250000).
    let estimate = estimate_size(
        &animated(10_000_000, 30.0),
        &Settings { fps: 10, quality: 50 },
    );
    assert!((estimate - 2_250_000.0).abs() < 1.0);
}

#[test]
fn animated_floor_binds_at_harsh_settings() {
    // 60 -> 1 fps at quality 1 bottoms out at the 0.12 heuristic floor.
    let estimate = estimate_size(
        &animated(1_000_000, 60.0),
        &Settings { fps: 1, quality: 1 },
    );
    assert!((estimate - 120_000.0).abs() < 1.0);
}

#[test]
fn unknown_source_fps_assumes_24() {
    let estimate = estimate_size(
        &animated(1_000_000, 0.0),
        &Settings { fps: 12, quality: 100 },
    );
    // fps_ratio 0.5, heuristic 0.5 * 1.0 = 0.5.
    assert!((estimate - 500_000.0).abs() < 1.0);
}

#[test]
fn monotone_in_quality() {
    for meta in [still(5_000_000), animated(5_000_000, 30.0)] {
        let mut previous = 0.0;
        for quality in 1..=100u8 {
            let estimate = estimate_size(&meta, &Settings { fps: 15, quality });
            assert!(
                estimate >= previous,
                "estimate dropped at quality {quality}"
            );
            previous = estimate;
        }
    }
}

#[test]
fn monotone_in_target_fps() {
    let meta = animated(5_000_000, 30.0);
    let mut previous = 0.0;
    for fps in 1..=30u32 {
        let estimate = estimate_size(&meta, &Settings { fps, quality: 50 });
        assert!(estimate >= previous, "estimate dropped at {fps} fps");
        previous = estimate;
    }
}
