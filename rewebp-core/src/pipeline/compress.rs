use tracing::{debug, warn};

use crate::decode::decode_webp;
use crate::encode::codec::FrameEncoder;
use crate::foundation::error::{RewebpError, RewebpResult};
use crate::foundation::format::{format_bytes, format_fps};
use crate::pipeline::estimate::normalized_quality;
use crate::pipeline::resample::resample;
use crate::pipeline::scale::{scale_factor, target_dimensions};
use crate::session::Session;

/// The outcome of one compression attempt.
#[derive(Clone, Debug)]
pub struct CompressionResult {
    /// Encoded WebP bytes.
    pub bytes: Vec<u8>,
    /// Output width in pixels.
    pub output_width: u32,
    /// Output height in pixels.
    pub output_height: u32,
    /// Output frame count (1 for the still path).
    pub output_frame_count: u32,
    /// Human-facing summary of what changed.
    pub summary: CompressionSummary,
}

impl CompressionResult {
    /// Length of the encoded payload in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Summary fields for the result panel: original vs. final rate, quality,
/// dimensions when changed, frame count when reduced, final byte size.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompressionSummary {
    /// Source frame rate.
    pub original_fps: f64,
    /// Effective target frame rate used for the encode.
    pub target_fps: u32,
    /// Quality the encoder was asked for.
    pub quality: u8,
    /// Source dimensions.
    pub original_dimensions: (u32, u32),
    /// Output dimensions.
    pub output_dimensions: (u32, u32),
    /// Source frame count.
    pub original_frame_count: u32,
    /// Output frame count.
    pub output_frame_count: u32,
    /// Source file size in bytes.
    pub original_size_bytes: u64,
    /// Encoded output size in bytes.
    pub final_size_bytes: u64,
    /// Whether the output is an animated WebP.
    pub animated: bool,
    /// Original file name.
    pub file_name: String,
}

impl CompressionSummary {
    /// Suggested output file name for a download-style sink.
    pub fn suggested_file_name(&self) -> String {
        let prefix = if self.animated { "animated" } else { "compressed" };
        format!("{prefix}-{}", self.file_name)
    }

    /// Render the summary as display lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "original: {} · {}",
                format_fps(self.original_fps),
                format_bytes(self.original_size_bytes as f64)
            ),
            format!("target: {} fps · quality {}", self.target_fps, self.quality),
        ];
        if self.output_dimensions != self.original_dimensions {
            lines.push(format!(
                "resolution: {} × {} (was {} × {})",
                self.output_dimensions.0,
                self.output_dimensions.1,
                self.original_dimensions.0,
                self.original_dimensions.1
            ));
        }
        if self.animated && self.output_frame_count != self.original_frame_count {
            lines.push(format!(
                "frames: {} → {}",
                self.original_frame_count, self.output_frame_count
            ));
        }
        lines.push(format!(
            "result: {}",
            format_bytes(self.final_size_bytes as f64)
        ));
        lines
    }
}

/// Run one compression attempt over a session's frames.
///
/// Progress is reported as a fraction in `[0, 1]` through fixed phases:
/// setup to 0.25, per-frame scaling to 0.50, per-frame conversion (animated
/// sources only) to 0.70, encode to 0.85, finalize to 1.0.
///
/// Any missing dimension, empty frame list or encoder rejection aborts the
/// whole attempt with a single error and no partial output; there is no
/// retry. A second call while one is in flight on the same session is
/// rejected.
#[tracing::instrument(skip_all, fields(file = %session.metadata().file_name))]
pub fn compress(
    session: &Session,
    encoder: &dyn FrameEncoder,
    on_progress: &mut dyn FnMut(f32),
) -> RewebpResult<CompressionResult> {
    let _guard = session.begin_compress()?;
    let metadata = session.metadata();
    let frames = session.frames();
    if frames.is_empty() {
        return Err(RewebpError::validation("no frames to compress"));
    }
    on_progress(0.10);

    let settings = session.settings().clamped();
    let quality_normalized = normalized_quality(settings.quality);
    let factor = scale_factor(metadata.has_animation, quality_normalized);

    // Resolve source dimensions: metadata, then the first frame, then a
    // re-decode of the held source bytes.
    let (mut source_width, mut source_height) = (metadata.width, metadata.height);
    if source_width == 0 || source_height == 0 {
        let first = &frames[0].bitmap;
        source_width = first.width();
        source_height = first.height();
    }
    if source_width == 0 || source_height == 0 {
        match decode_webp(session.input()) {
            Ok(media) => {
                source_width = media.metadata.width;
                source_height = media.metadata.height;
            }
            Err(e) => warn!(error = %e, "re-decode for dimensions failed"),
        }
    }
    if source_width == 0 || source_height == 0 {
        return Err(RewebpError::dimension(
            "frame resolution could not be resolved, compression aborted",
        ));
    }

    let (target_width, target_height) = target_dimensions(source_width, source_height, factor);
    let source_fps_rounded = if metadata.fps > 0.0 {
        (metadata.fps.round() as u32).max(1)
    } else {
        24
    };
    let target_fps = settings.fps.clamp(1, source_fps_rounded);

    let resampled = resample(frames, metadata.fps, f64::from(target_fps));
    if resampled.is_empty() {
        return Err(RewebpError::validation("no frames left after resampling"));
    }
    debug!(
        frames = resampled.len(),
        target_width, target_height, target_fps, "compression plan ready"
    );
    on_progress(0.25);

    // Scale sequentially; owned entries are newly-allocated copies that are
    // released when this list drops after the encode.
    let mut scaled = Vec::with_capacity(resampled.len());
    for (i, frame) in resampled.iter().enumerate() {
        scaled.push((
            frame.bitmap.scaled_to(target_width, target_height),
            frame.duration_ms,
        ));
        on_progress(0.25 + 0.25 * (i + 1) as f32 / resampled.len() as f32);
    }

    let animated_source = metadata.has_animation && metadata.frame_count > 1;
    let bytes = if animated_source {
        let mut pairs = Vec::with_capacity(scaled.len());
        for (i, (bitmap, duration_ms)) in scaled.iter().enumerate() {
            pairs.push((bitmap.bitmap().to_pixels(), *duration_ms));
            on_progress(0.50 + 0.20 * (i + 1) as f32 / scaled.len() as f32);
        }
        encoder.encode_animated(&pairs, settings.quality, 0)?
    } else {
        let (bitmap, _) = &scaled[0];
        encoder.encode_still(&bitmap.bitmap().to_pixels(), settings.quality)?
    };
    on_progress(0.85);
    drop(scaled);

    let output_frame_count = if animated_source {
        resampled.len() as u32
    } else {
        1
    };
    let summary = CompressionSummary {
        original_fps: metadata.fps,
        target_fps,
        quality: settings.quality,
        original_dimensions: (source_width, source_height),
        output_dimensions: (target_width, target_height),
        original_frame_count: metadata.frame_count,
        output_frame_count,
        original_size_bytes: metadata.size_bytes,
        final_size_bytes: bytes.len() as u64,
        animated: animated_source,
        file_name: metadata.file_name.clone(),
    };
    on_progress(1.0);

    Ok(CompressionResult {
        bytes,
        output_width: target_width,
        output_height: target_height,
        output_frame_count,
        summary,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/compress.rs"]
mod tests;
