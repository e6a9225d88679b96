use std::sync::atomic::{AtomicBool, Ordering};

use crate::decode::{DecodedMedia, InputFile, decode_webp};
use crate::foundation::error::{RewebpError, RewebpResult};
use crate::media::frame::{Frame, Metadata, Settings};
use crate::pipeline::estimate::estimate_size;

/// One loaded file and everything derived from it.
///
/// A session replaces ambient state: frames, metadata and settings live
/// together, are created by a successful decode, and are dropped wholesale
/// (releasing every frame bitmap) when the session is replaced or cleared.
#[derive(Debug)]
pub struct Session {
    input: InputFile,
    frames: Vec<Frame>,
    metadata: Metadata,
    settings: Settings,
    compressing: AtomicBool,
}

impl Session {
    /// Decode `input` and build a session around the result.
    ///
    /// Zero metadata dimensions are backfilled once from the first frame;
    /// settings are seeded from the source (fps capped at 60, quality 80).
    pub fn load(input: InputFile) -> RewebpResult<Self> {
        let DecodedMedia {
            frames,
            mut metadata,
        } = decode_webp(&input)?;
        if (metadata.width == 0 || metadata.height == 0)
            && let Some(first) = frames.first()
        {
            metadata.width = first.bitmap.width();
            metadata.height = first.bitmap.height();
        }
        let settings = Settings::from_source(&metadata);
        Ok(Self {
            input,
            frames,
            metadata,
            settings,
            compressing: AtomicBool::new(false),
        })
    }

    /// The decoded frames in display order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of decoded frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Per-frame display durations, for driving playback.
    pub fn frame_durations(&self) -> Vec<u32> {
        self.frames.iter().map(|f| f.duration_ms).collect()
    }

    /// Source metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Current compression settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Replace the settings, forcing them into their valid ranges.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.clamped();
    }

    /// Predicted output size in bytes for the current settings.
    ///
    /// A heuristic, not a measurement; see
    /// [`estimate_size`](crate::estimate_size).
    pub fn estimate(&self) -> f64 {
        estimate_size(&self.metadata, &self.settings)
    }

    /// The original input, kept for dimension re-derivation and re-decoding.
    pub fn input(&self) -> &InputFile {
        &self.input
    }

    /// Assemble a session from already-decoded parts, bypassing the decode
    /// chain. Test-only.
    #[cfg(test)]
    pub(crate) fn from_parts(
        input: InputFile,
        frames: Vec<Frame>,
        metadata: Metadata,
        settings: Settings,
    ) -> Self {
        Self {
            input,
            frames,
            metadata,
            settings,
            compressing: AtomicBool::new(false),
        }
    }

    /// Mark a compression attempt as in flight.
    ///
    /// At most one attempt runs per session; a second concurrent call is
    /// rejected rather than queued. The returned guard clears the flag when
    /// the attempt finishes, successfully or not.
    pub(crate) fn begin_compress(&self) -> RewebpResult<CompressGuard<'_>> {
        if self
            .compressing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(RewebpError::validation(
                "compression already in flight for this session",
            ));
        }
        Ok(CompressGuard {
            flag: &self.compressing,
        })
    }
}

pub(crate) struct CompressGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for CompressGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
