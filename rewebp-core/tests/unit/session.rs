use super::*;

use crate::decode::MAX_INPUT_BYTES;
use crate::encode::codec::FrameEncoder as _;
use crate::encode::webp::LibwebpEncoder;
use crate::media::bitmap::PixelBuffer;

fn solid_pixels(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
    PixelBuffer {
        width,
        height,
        rgba: rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect(),
    }
}

fn animated_fixture() -> Vec<u8> {
    let frames: Vec<(PixelBuffer, u32)> = (0..4u8)
        .map(|i| (solid_pixels(12, 12, [i * 60, 80, 80, 255]), 125))
        .collect();
    LibwebpEncoder::new().encode_animated(&frames, 90, 0).unwrap()
}

#[test]
fn load_builds_frames_metadata_and_settings_together() {
    let session = Session::load(InputFile::new(animated_fixture(), "anim.webp")).unwrap();
    assert_eq!(session.frame_count(), 4);
    assert_eq!(session.frame_durations(), vec![125, 125, 125, 125]);

    let metadata = session.metadata();
    assert_eq!((metadata.width, metadata.height), (12, 12));
    assert!(metadata.has_animation);
    assert_eq!(metadata.file_name, "anim.webp");

    // Seeded from the source: 4 frames over 500 ms is 8 fps.
    assert_eq!(session.settings(), Settings { fps: 8, quality: 80 });
    assert!(session.estimate() > 0.0);
}

#[test]
fn load_rejects_oversized_input() {
    let input = InputFile::new(vec![0u8; (MAX_INPUT_BYTES + 1) as usize], "big.webp");
    let err = Session::load(input).unwrap_err();
    assert!(matches!(err, RewebpError::InputRejected(_)));
}

#[test]
fn load_rejects_declared_non_webp_media_type() {
    let input = InputFile::new(animated_fixture(), "anim.gif").with_media_type("image/gif");
    let err = Session::load(input).unwrap_err();
    assert!(matches!(err, RewebpError::InputRejected(_)));
}

#[test]
fn set_settings_clamps_out_of_range_values() {
    let mut session = Session::load(InputFile::new(animated_fixture(), "anim.webp")).unwrap();
    session.set_settings(Settings { fps: 0, quality: 200 });
    assert_eq!(session.settings(), Settings { fps: 1, quality: 100 });
}

#[test]
fn only_one_compression_runs_at_a_time() {
    let session = Session::load(InputFile::new(animated_fixture(), "anim.webp")).unwrap();
    let guard = session.begin_compress().unwrap();
    assert!(session.begin_compress().is_err());
    drop(guard);
    assert!(session.begin_compress().is_ok());
}
