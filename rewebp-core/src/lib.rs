//! rewebp turns an uploaded WebP file (static or animated) into a sequence of
//! timed bitmap frames, and re-encodes that sequence into a new, smaller WebP
//! at a caller-chosen frame rate and quality.
//!
//! The WebP bitstream work is delegated to libwebp (through the `webp` and
//! `webp-animation` crates); this crate is the pipeline around it.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: `InputFile -> DecodedMedia` via an ordered provider chain
//!    (animated demux first, still-image fallback second)
//! 2. **Resample**: reduce the frame sequence to a target display rate by
//!    bucketing frames and summing durations ([`resample`])
//! 3. **Scale**: compute a uniform spatial downscale factor from quality and
//!    animation-presence ([`scale_factor`])
//! 4. **Encode**: one [`FrameEncoder`] call per attempt (animated or still),
//!    orchestrated by [`compress`] with phase-based progress reporting
//!
//! [`estimate_size`] predicts the output size from metadata alone, so callers
//! can give feedback before committing to the comparatively slow real encode.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Sequential by design**: each frame is processed to completion before
//!   the next; the only background thread is the playback timer.
//! - **No partial output**: any compression-phase failure aborts the whole
//!   attempt with a single error, and the caller must re-invoke from scratch.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod decode;
mod encode;
mod foundation;
mod media;
mod pipeline;
mod playback;
mod session;

pub use decode::{DecodedMedia, InputFile, MAX_INPUT_BYTES, decode_webp};
pub use encode::codec::{EncodeCall, FrameEncoder, RecordingEncoder};
pub use encode::webp::LibwebpEncoder;
pub use foundation::error::{RewebpError, RewebpResult};
pub use foundation::format::{format_bytes, format_duration_ms, format_fps};
pub use media::bitmap::{Bitmap, PixelBuffer, ScaledBitmap};
pub use media::frame::{Frame, Metadata, Settings};
pub use pipeline::compress::{CompressionResult, CompressionSummary, compress};
pub use pipeline::estimate::{estimate_size, normalized_quality};
pub use pipeline::resample::{ResampledFrame, resample};
pub use pipeline::scale::{scale_factor, target_dimensions};
pub use playback::player::{Player, advance, frame_delay, retreat};
pub use playback::timer::ScheduledTask;
pub use session::Session;
