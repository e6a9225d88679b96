use std::sync::Mutex;

use crate::foundation::error::{RewebpError, RewebpResult};
use crate::media::bitmap::PixelBuffer;

/// Encoder contract with the two WebP entry points the pipeline needs.
///
/// Exactly one call is made per compression attempt: `encode_animated` with
/// the full ordered frame list for animated sources, `encode_still`
/// otherwise. Implementations receive integer quality in `1..=100`.
pub trait FrameEncoder {
    /// Encode a single still image.
    fn encode_still(&self, pixels: &PixelBuffer, quality: u8) -> RewebpResult<Vec<u8>>;

    /// Encode an ordered list of `(pixels, duration-in-ms)` pairs.
    ///
    /// `loop_count` of zero requests infinite looping.
    fn encode_animated(
        &self,
        frames: &[(PixelBuffer, u32)],
        quality: u8,
        loop_count: i32,
    ) -> RewebpResult<Vec<u8>>;
}

/// One recorded [`RecordingEncoder`] invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodeCall {
    /// A still encode with the frame's dimensions and quality.
    Still {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
        /// Requested quality.
        quality: u8,
    },
    /// An animated encode with per-frame durations, quality and loop count.
    Animated {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
        /// Ordered per-frame durations in milliseconds.
        durations_ms: Vec<u32>,
        /// Requested quality.
        quality: u8,
        /// Requested loop count (0 = infinite).
        loop_count: i32,
    },
}

/// In-memory encoder fake for tests and debugging.
///
/// Records every call and returns a canned payload; `failing()` builds one
/// that rejects every job instead.
#[derive(Debug, Default)]
pub struct RecordingEncoder {
    calls: Mutex<Vec<EncodeCall>>,
    fail: bool,
}

impl RecordingEncoder {
    /// Build an encoder that succeeds with a canned payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an encoder that rejects every job.
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Snapshot the recorded calls in invocation order.
    pub fn calls(&self) -> Vec<EncodeCall> {
        self.calls.lock().expect("encoder call log poisoned").clone()
    }

    fn record(&self, call: EncodeCall) -> RewebpResult<Vec<u8>> {
        self.calls
            .lock()
            .expect("encoder call log poisoned")
            .push(call);
        if self.fail {
            return Err(RewebpError::encode("recording encoder primed to fail"));
        }
        Ok(b"RIFF\0\0\0\0WEBP".to_vec())
    }
}

impl FrameEncoder for RecordingEncoder {
    fn encode_still(&self, pixels: &PixelBuffer, quality: u8) -> RewebpResult<Vec<u8>> {
        self.record(EncodeCall::Still {
            width: pixels.width,
            height: pixels.height,
            quality,
        })
    }

    fn encode_animated(
        &self,
        frames: &[(PixelBuffer, u32)],
        quality: u8,
        loop_count: i32,
    ) -> RewebpResult<Vec<u8>> {
        let (width, height) = frames
            .first()
            .map(|(p, _)| (p.width, p.height))
            .unwrap_or((0, 0));
        self.record(EncodeCall::Animated {
            width,
            height,
            durations_ms: frames.iter().map(|(_, d)| *d).collect(),
            quality,
            loop_count,
        })
    }
}
