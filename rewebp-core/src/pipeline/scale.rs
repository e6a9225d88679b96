/// Minimum spatial downscale factor; lower would produce unusable output.
const SCALE_FLOOR: f64 = 0.35;

/// Quality above which downscaling is skipped entirely.
const FULL_QUALITY_THRESHOLD: f64 = 0.98;

/// Compute the uniform spatial downscale factor for a re-encode.
///
/// Stills are never downscaled, whatever the quality: they only get
/// re-encoded at the chosen quality level. Animated sequences pay a
/// per-frame cost multiplied by frame count, so they downscale linearly
/// with quality, floored at 0.35, except near maximum quality where the
/// factor snaps back to 1.
pub fn scale_factor(has_animation: bool, quality_normalized: f64) -> f64 {
    if !has_animation {
        return 1.0;
    }
    if quality_normalized >= FULL_QUALITY_THRESHOLD {
        return 1.0;
    }
    (quality_normalized + 0.05).max(SCALE_FLOOR)
}

/// Apply a scale factor to source dimensions, rounding and flooring at 1 px.
pub fn target_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let w = (f64::from(width) * factor).round().max(1.0) as u32;
    let h = (f64::from(height) * factor).round().max(1.0) as u32;
    (w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/scale.rs"]
mod tests;
