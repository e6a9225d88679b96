use crate::media::bitmap::Bitmap;

/// One decoded frame: a bitmap plus its display duration.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Decoded pixels, owned by the frame sequence until released.
    pub bitmap: Bitmap,
    /// Display duration in milliseconds, always >= 1.
    pub duration_ms: u32,
}

impl Frame {
    /// Build a frame, clamping the duration to the >= 1 ms invariant.
    pub fn new(bitmap: Bitmap, duration_ms: u32) -> Self {
        Self {
            bitmap,
            duration_ms: duration_ms.max(1),
        }
    }
}

/// Source metadata derived once at decode time.
///
/// Immutable thereafter, except that zero `width`/`height` may be backfilled
/// once from the first decoded frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metadata {
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
    /// Number of decoded frames.
    pub frame_count: u32,
    /// Source frame rate, derived from frame timing.
    pub fps: f64,
    /// Total animation duration in milliseconds.
    pub total_duration_ms: f64,
    /// Size of the encoded source file in bytes.
    pub size_bytes: u64,
    /// Whether the source holds more than one frame.
    pub has_animation: bool,
    /// Original file name, used for download/output naming.
    pub file_name: String,
}

/// User-adjustable compression settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Target frame rate, >= 1.
    pub fps: u32,
    /// Target quality in `1..=100`.
    pub quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 24,
            quality: 80,
        }
    }
}

impl Settings {
    /// Seed settings from source metadata: the source frame rate capped at
    /// 60 fps, and the default quality.
    pub fn from_source(metadata: &Metadata) -> Self {
        let source_fps = if metadata.fps > 0.0 {
            metadata.fps.round() as u32
        } else {
            24
        };
        Self {
            fps: source_fps.clamp(1, 60),
            quality: 80,
        }
    }

    /// Return a copy with both fields forced into their valid ranges.
    pub fn clamped(self) -> Self {
        Self {
            fps: self.fps.max(1),
            quality: self.quality.clamp(1, 100),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/frame.rs"]
mod tests;
