use crate::decode::{DecodeProvider, DecodedMedia, InputFile};
use crate::foundation::error::RewebpResult;
use crate::media::bitmap::Bitmap;
use crate::media::frame::{Frame, Metadata};

use anyhow::Context as _;

/// Reduced-fidelity fallback: decode a single still frame.
///
/// Animated inputs that reach this provider lose all but their first frame;
/// the result is presented as a non-animated source.
pub(crate) struct StillFallbackDecoder;

impl DecodeProvider for StillFallbackDecoder {
    fn name(&self) -> &'static str {
        "still-fallback"
    }

    fn decode(&self, input: &InputFile) -> RewebpResult<DecodedMedia> {
        let decoded =
            image::load_from_memory(&input.bytes).context("decode still image from memory")?;
        let bitmap = Bitmap::new(decoded.to_rgba8());
        let metadata = Metadata {
            width: bitmap.width(),
            height: bitmap.height(),
            frame_count: 1,
            fps: 24.0,
            total_duration_ms: 1000.0,
            size_bytes: input.bytes.len() as u64,
            has_animation: false,
            file_name: input.name.clone(),
        };
        let frames = vec![Frame::new(bitmap, (1000.0_f64 / 24.0).round() as u32)];
        Ok(DecodedMedia { frames, metadata })
    }
}
