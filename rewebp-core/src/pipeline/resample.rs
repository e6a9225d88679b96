use crate::media::bitmap::Bitmap;
use crate::media::frame::Frame;

/// One resampled frame: a reference into the source sequence plus the merged
/// display duration. Resampling never copies pixel data.
#[derive(Clone, Copy, Debug)]
pub struct ResampledFrame<'a> {
    /// Representative bitmap (the first frame of the bucket).
    pub bitmap: &'a Bitmap,
    /// Summed duration of every frame merged into this bucket.
    pub duration_ms: u32,
}

/// Reduce a frame sequence to a target display rate.
///
/// Frames are partitioned into sequential buckets of
/// `round(original_fps / target_fps)` frames; each bucket keeps its first
/// bitmap and the sum of its normalized durations, so total animation
/// duration is preserved while the frame count drops. When the target rate
/// is not below the source rate (or there is a single frame), the sequence
/// passes through with durations normalized only.
pub fn resample<'a>(
    frames: &'a [Frame],
    original_fps: f64,
    target_fps: f64,
) -> Vec<ResampledFrame<'a>> {
    if frames.is_empty() {
        return Vec::new();
    }
    let original_fps = if original_fps > 0.0 {
        original_fps
    } else if target_fps > 0.0 {
        target_fps
    } else {
        24.0
    };
    let normalize = |duration_ms: u32| -> u32 {
        if duration_ms >= 1 {
            duration_ms
        } else {
            ((1000.0 / original_fps).round() as u32).max(1)
        }
    };

    if frames.len() <= 1 || target_fps >= original_fps {
        return frames
            .iter()
            .map(|f| ResampledFrame {
                bitmap: &f.bitmap,
                duration_ms: normalize(f.duration_ms),
            })
            .collect();
    }

    let group_size = ((original_fps / target_fps).round() as usize).max(1);
    let mut resampled = Vec::with_capacity(frames.len().div_ceil(group_size));
    let mut bucket_duration = 0u32;
    let mut bucket_count = 0usize;
    let mut bucket_bitmap = &frames[0].bitmap;
    for (i, frame) in frames.iter().enumerate() {
        if bucket_count == 0 {
            bucket_bitmap = &frame.bitmap;
        }
        bucket_duration += normalize(frame.duration_ms);
        bucket_count += 1;
        // A trailing partial bucket is still flushed as its own frame.
        if bucket_count >= group_size || i == frames.len() - 1 {
            resampled.push(ResampledFrame {
                bitmap: bucket_bitmap,
                duration_ms: bucket_duration,
            });
            bucket_duration = 0;
            bucket_count = 0;
        }
    }
    resampled
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/resample.rs"]
mod tests;
