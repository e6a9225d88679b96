use super::*;

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

fn still_webp(width: u32, height: u32) -> Vec<u8> {
    LibwebpEncoder::new()
        .encode_still(&solid_pixels(width, height, [90, 120, 30, 255]), 90)
        .unwrap()
}

fn animated_webp(width: u32, height: u32, durations_ms: &[u32]) -> Vec<u8> {
    let frames: Vec<(PixelBuffer, u32)> = durations_ms
        .iter()
        .enumerate()
        .map(|(i, d)| (solid_pixels(width, height, [i as u8 * 50, 0, 200, 255]), *d))
        .collect();
    LibwebpEncoder::new().encode_animated(&frames, 90, 0).unwrap()
}

#[test]
fn oversized_input_is_rejected_before_decode() {
    let input = InputFile::new(vec![0u8; (MAX_INPUT_BYTES + 1) as usize], "big.webp");
    let err = decode_webp(&input).unwrap_err();
    assert!(matches!(err, RewebpError::InputRejected(_)));
}

#[test]
fn declared_non_webp_type_is_rejected() {
    let input = InputFile::new(still_webp(4, 4), "a.png").with_media_type("image/png");
    let err = decode_webp(&input).unwrap_err();
    assert!(matches!(err, RewebpError::InputRejected(_)));
}

#[test]
fn untyped_input_without_container_magic_is_rejected() {
    let input = InputFile::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12], "mystery.bin");
    let err = decode_webp(&input).unwrap_err();
    assert!(matches!(err, RewebpError::InputRejected(_)));
}

#[test]
fn garbage_with_webp_type_exhausts_the_chain() {
    let input =
        InputFile::new(vec![0xAB; 64], "broken.webp").with_media_type("image/webp");
    let err = decode_webp(&input).unwrap_err();
    assert!(matches!(err, RewebpError::DecodeFailed(_)));
}

#[test]
fn still_webp_decodes_to_a_single_frame() {
    let input = InputFile::new(still_webp(9, 6), "still.webp");
    let media = decode_webp(&input).unwrap();
    assert_eq!(media.frames.len(), 1);
    assert_eq!(media.metadata.frame_count, 1);
    assert!(!media.metadata.has_animation);
    assert_eq!((media.metadata.width, media.metadata.height), (9, 6));
    assert!(media.frames[0].duration_ms >= 1);
}

#[test]
fn animated_webp_decodes_frames_and_timing() {
    let input = InputFile::new(animated_webp(10, 10, &[100, 100, 100]), "anim.webp");
    let media = decode_webp(&input).unwrap();
    assert_eq!(media.frames.len(), 3);
    assert!(media.metadata.has_animation);
    assert_eq!((media.metadata.width, media.metadata.height), (10, 10));
    let durations: Vec<u32> = media.frames.iter().map(|f| f.duration_ms).collect();
    assert_eq!(durations, vec![100, 100, 100]);
    assert_eq!(media.metadata.total_duration_ms, 300.0);
    assert!((media.metadata.fps - 10.0).abs() < 1e-9);
}

#[test]
fn container_magic_is_sniffed() {
    assert!(looks_like_webp(&still_webp(2, 2)));
    assert!(!looks_like_webp(b"RIFFxxxxWAVE"));
    assert!(!looks_like_webp(b"RIFF"));
}
