//! WebP decoding behind an ordered chain of providers.
//!
//! The animated demuxer is tried first; when it cannot make sense of the
//! input, decoding degrades to a best-effort single still frame rather than
//! hard failure. Inputs are gated (size, media type) before any provider
//! runs.

mod animated;
mod still;

use tracing::{debug, warn};

use crate::foundation::error::{RewebpError, RewebpResult};
use crate::media::frame::{Frame, Metadata};

use animated::AnimatedWebpDecoder;
use still::StillFallbackDecoder;

/// Largest accepted input file: 50 MB.
pub const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

/// An uploaded file: raw bytes plus the name and media type the environment
/// declared for it.
#[derive(Clone, Debug)]
pub struct InputFile {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// Original file name.
    pub name: String,
    /// Declared media type, if the environment provided one.
    pub media_type: Option<String>,
}

impl InputFile {
    /// Build an input with no declared media type; the WebP container magic
    /// is sniffed instead.
    pub fn new(bytes: Vec<u8>, name: impl Into<String>) -> Self {
        Self {
            bytes,
            name: name.into(),
            media_type: None,
        }
    }

    /// Attach a declared media type (e.g. `image/webp`).
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// A successfully decoded file: the frame sequence and its metadata,
/// created together and replaced wholesale on the next load.
#[derive(Debug)]
pub struct DecodedMedia {
    /// Decoded frames in display order.
    pub frames: Vec<Frame>,
    /// Metadata derived from the decode.
    pub metadata: Metadata,
}

/// One strategy in the decode chain.
pub(crate) trait DecodeProvider {
    fn name(&self) -> &'static str;
    fn decode(&self, input: &InputFile) -> RewebpResult<DecodedMedia>;
}

/// Decode a WebP file into timed frames.
///
/// Rejects oversized or non-WebP input before any decode work, then walks
/// the provider chain in order and returns the first success. A chain where
/// every provider fails surfaces as [`RewebpError::DecodeFailed`].
pub fn decode_webp(input: &InputFile) -> RewebpResult<DecodedMedia> {
    check_input(input)?;

    let providers: [&dyn DecodeProvider; 2] = [&AnimatedWebpDecoder, &StillFallbackDecoder];
    let mut last_error = None;
    for provider in providers {
        match provider.decode(input) {
            Ok(media) => {
                debug!(
                    provider = provider.name(),
                    frames = media.frames.len(),
                    fps = media.metadata.fps,
                    "decoded input"
                );
                return Ok(media);
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "decode provider failed");
                last_error = Some(e);
            }
        }
    }
    Err(RewebpError::decode(format!(
        "no decode provider could handle '{}': {}",
        input.name,
        last_error.map_or_else(|| "no providers ran".to_string(), |e| e.to_string())
    )))
}

fn check_input(input: &InputFile) -> RewebpResult<()> {
    if input.bytes.len() as u64 > MAX_INPUT_BYTES {
        return Err(RewebpError::input_rejected(format!(
            "'{}' is {} bytes, over the {} limit",
            input.name,
            input.bytes.len(),
            MAX_INPUT_BYTES
        )));
    }
    match input.media_type.as_deref() {
        Some(t) if t.to_ascii_lowercase().contains("webp") => Ok(()),
        Some(t) => Err(RewebpError::input_rejected(format!(
            "'{}' declares media type '{t}', expected WebP",
            input.name
        ))),
        None if looks_like_webp(&input.bytes) => Ok(()),
        None => Err(RewebpError::input_rejected(format!(
            "'{}' has no declared media type and no WebP container magic",
            input.name
        ))),
    }
}

/// RIFF container with a `WEBP` form type.
fn looks_like_webp(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
}

#[cfg(test)]
#[path = "../../tests/unit/decode/chain.rs"]
mod tests;
