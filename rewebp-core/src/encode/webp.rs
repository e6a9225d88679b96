use webp_animation::{AnimParams, EncoderOptions, EncodingConfig, EncodingType};

use crate::encode::codec::FrameEncoder;
use crate::foundation::error::{RewebpError, RewebpResult};
use crate::media::bitmap::PixelBuffer;

/// Production encoder backed by libwebp: the `webp` crate for stills, the
/// `webp-animation` muxer for animations.
#[derive(Clone, Copy, Debug, Default)]
pub struct LibwebpEncoder;

impl LibwebpEncoder {
    /// Build the encoder.
    pub fn new() -> Self {
        Self
    }
}

impl FrameEncoder for LibwebpEncoder {
    fn encode_still(&self, pixels: &PixelBuffer, quality: u8) -> RewebpResult<Vec<u8>> {
        let encoder = webp::Encoder::from_rgba(&pixels.rgba, pixels.width, pixels.height);
        let memory = encoder
            .encode_simple(false, f32::from(quality))
            .map_err(|e| RewebpError::encode(format!("still webp encode failed: {e:?}")))?;
        Ok(memory.to_vec())
    }

    fn encode_animated(
        &self,
        frames: &[(PixelBuffer, u32)],
        quality: u8,
        loop_count: i32,
    ) -> RewebpResult<Vec<u8>> {
        let Some((first, _)) = frames.first() else {
            return Err(RewebpError::validation(
                "animated encode needs at least one frame",
            ));
        };
        let (width, height) = (first.width, first.height);

        let options = EncoderOptions {
            anim_params: AnimParams { loop_count },
            encoding_config: Some(EncodingConfig {
                quality: f32::from(quality),
                encoding_type: EncodingType::Lossy(Default::default()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut encoder = webp_animation::Encoder::new_with_options((width, height), options)
            .map_err(|e| {
                RewebpError::encoder_unavailable(format!("animated webp encoder init failed: {e:?}"))
            })?;

        // Timestamps are cumulative frame start times in milliseconds.
        let mut timestamp_ms = 0i32;
        for (pixels, duration_ms) in frames {
            if pixels.width != width || pixels.height != height {
                return Err(RewebpError::validation(format!(
                    "frame size {}x{} does not match first frame {width}x{height}",
                    pixels.width, pixels.height
                )));
            }
            encoder
                .add_frame(&pixels.rgba, timestamp_ms)
                .map_err(|e| RewebpError::encode(format!("animated frame encode failed: {e:?}")))?;
            timestamp_ms += *duration_ms as i32;
        }

        let data = encoder
            .finalize(timestamp_ms)
            .map_err(|e| RewebpError::encode(format!("animated webp finalize failed: {e:?}")))?;
        Ok(data.to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/webp.rs"]
mod tests;
