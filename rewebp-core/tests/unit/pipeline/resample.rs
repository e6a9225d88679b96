use super::*;

fn frames(count: usize, duration_ms: u32) -> Vec<Frame> {
    (0..count)
        .map(|_| Frame {
            bitmap: Bitmap::new(image::RgbaImage::new(2, 2)),
            duration_ms,
        })
        .collect()
}

fn total(resampled: &[ResampledFrame<'_>]) -> u64 {
    resampled.iter().map(|f| u64::from(f.duration_ms)).sum()
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(resample(&[], 30.0, 10.0).is_empty());
}

#[test]
fn target_at_or_above_source_passes_through() {
    let input = frames(10, 33);
    let out = resample(&input, 30.0, 30.0);
    assert_eq!(out.len(), 10);
    assert!(out.iter().all(|f| f.duration_ms == 33));

    let out = resample(&input, 30.0, 60.0);
    assert_eq!(out.len(), 10);
}

#[test]
fn passthrough_normalizes_zero_durations() {
    let input = frames(3, 0);
    let out = resample(&input, 25.0, 25.0);
    // 1000 / 25 fps
    assert!(out.iter().all(|f| f.duration_ms == 40));
}

#[test]
fn single_frame_is_never_bucketed() {
    let input = frames(1, 0);
    let out = resample(&input, 30.0, 5.0);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].duration_ms, 33);
}

#[test]
fn buckets_keep_first_bitmap_and_sum_durations() {
    let input = frames(27, 40);
    let out = resample(&input, 30.0, 10.0);
    assert_eq!(out.len(), 9);
    assert!(out.iter().all(|f| f.duration_ms == 120));
    assert!(std::ptr::eq(out[0].bitmap, &input[0].bitmap));
    assert!(std::ptr::eq(out[1].bitmap, &input[3].bitmap));
}

#[test]
fn trailing_partial_bucket_is_flushed() {
    let input = frames(28, 40);
    let out = resample(&input, 30.0, 10.0);
    assert_eq!(out.len(), 10);
    assert_eq!(out[9].duration_ms, 40);
    assert!(std::ptr::eq(out[9].bitmap, &input[27].bitmap));
}

#[test]
fn total_duration_is_preserved() {
    let mut input = frames(17, 0);
    for (i, frame) in input.iter_mut().enumerate() {
        frame.duration_ms = (i as u32 % 5) * 13; // includes zeros to normalize
    }
    let normalized: u64 = input
        .iter()
        .map(|f| u64::from(if f.duration_ms >= 1 { f.duration_ms } else { 33 }))
        .sum();
    let out = resample(&input, 30.0, 7.0);
    assert_eq!(total(&out), normalized);
}

#[test]
fn unknown_source_fps_falls_back_to_target() {
    let input = frames(6, 0);
    let out = resample(&input, 0.0, 10.0);
    // Treated as target == source: passthrough with 1000/10 durations.
    assert_eq!(out.len(), 6);
    assert!(out.iter().all(|f| f.duration_ms == 100));
}
