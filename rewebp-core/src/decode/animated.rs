use tracing::warn;

use crate::decode::{DecodeProvider, DecodedMedia, InputFile};
use crate::foundation::error::{RewebpError, RewebpResult};
use crate::media::bitmap::Bitmap;
use crate::media::frame::{Frame, Metadata};

/// Safeguard against malformed files reporting unbounded frame streams.
const MAX_DECODE_FRAMES: usize = 500;

/// Assumed rate when a frame carries no usable timing.
const FALLBACK_FPS: f64 = 24.0;

/// Primary provider: full animated demux through libwebp.
///
/// Handles still WebP files too (they demux to a single frame); genuinely
/// unreadable input falls through to the next provider in the chain.
pub(crate) struct AnimatedWebpDecoder;

impl DecodeProvider for AnimatedWebpDecoder {
    fn name(&self) -> &'static str {
        "animated-webp"
    }

    fn decode(&self, input: &InputFile) -> RewebpResult<DecodedMedia> {
        let decoder = webp_animation::Decoder::new(&input.bytes)
            .map_err(|e| RewebpError::decode(format!("webp demux failed: {e:?}")))?;

        let fallback_duration_ms = (1000.0 / FALLBACK_FPS).round() as u32;
        let mut frames = Vec::new();
        let mut previous_ts = 0i32;
        let mut total_duration_ms = 0u64;
        for decoded in decoder.into_iter() {
            if frames.len() >= MAX_DECODE_FRAMES {
                warn!(
                    limit = MAX_DECODE_FRAMES,
                    "frame stream did not terminate, truncating"
                );
                break;
            }
            let (width, height) = decoded.dimensions();
            // Timestamps mark when a frame stops showing; malformed files can
            // report zero or backwards times, which we normalize away.
            let raw = decoded.timestamp() - previous_ts;
            previous_ts = decoded.timestamp();
            let duration_ms = if raw >= 1 {
                raw as u32
            } else {
                fallback_duration_ms
            };
            total_duration_ms += u64::from(duration_ms);
            let bitmap = Bitmap::from_rgba(decoded.data().to_vec(), width, height)?;
            frames.push(Frame::new(bitmap, duration_ms));
        }

        if frames.is_empty() {
            return Err(RewebpError::decode(
                "no frames could be demuxed from the input",
            ));
        }

        let fps = if total_duration_ms > 0 {
            frames.len() as f64 / total_duration_ms as f64 * 1000.0
        } else {
            FALLBACK_FPS
        };
        let first = &frames[0].bitmap;
        let metadata = Metadata {
            width: first.width(),
            height: first.height(),
            frame_count: frames.len() as u32,
            fps,
            total_duration_ms: total_duration_ms as f64,
            size_bytes: input.bytes.len() as u64,
            has_animation: frames.len() > 1,
            file_name: input.name.clone(),
        };
        Ok(DecodedMedia { frames, metadata })
    }
}
