use crate::media::frame::{Metadata, Settings};
use crate::pipeline::scale::scale_factor;

/// Normalize a `1..=100` quality setting to `[0.05, 1]`.
///
/// The 0.05 floor keeps the heuristics from estimating as if quality were
/// zero.
pub fn normalized_quality(quality: u8) -> f64 {
    (f64::from(quality) / 100.0).clamp(0.05, 1.0)
}

/// Predict the output size in bytes for the given source and settings.
///
/// This is a heuristic model, not a measurement: it exists to give fast
/// feedback before committing to the comparatively slow real encode, and
/// must never be presented as the actual post-encode byte count.
pub fn estimate_size(metadata: &Metadata, settings: &Settings) -> f64 {
    let quality_normalized = normalized_quality(settings.quality);
    let factor = scale_factor(metadata.has_animation, quality_normalized);
    let source_bytes = metadata.size_bytes as f64;

    if !metadata.has_animation {
        // The 0.12 floor models encoder overhead / minimum compression.
        let quality_factor = 0.35 + quality_normalized * 0.6;
        let scale_penalty = factor * factor;
        return (source_bytes * 0.12).max(source_bytes * quality_factor * scale_penalty);
    }

    let fps_ratio = if metadata.fps > 0.0 {
        (f64::from(settings.fps) / metadata.fps).min(1.0)
    } else {
        f64::from(settings.fps) / 24.0
    };
    let quality_ratio = f64::from(settings.quality) / 100.0;
    let heuristic = (fps_ratio * (0.35 + quality_ratio * 0.65)).max(0.12);
    (source_bytes * 0.08).max(source_bytes * heuristic)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/estimate.rs"]
mod tests;
