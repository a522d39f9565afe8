use std::io::Cursor;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use super::*;

fn decode_frames(bytes: &[u8]) -> Vec<image::Frame> {
    GifDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn encodes_every_frame_with_delay() {
    let frames = vec![
        Raster::solid(4, 4, [255, 0, 0, 255]).unwrap(),
        Raster::solid(4, 4, [0, 0, 255, 255]).unwrap(),
    ];
    let bytes = GifLoopEncoder::default().encode(&frames, 500, true).unwrap();
    assert!(bytes.starts_with(b"GIF8"));

    let decoded = decode_frames(&bytes);
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].delay().numer_denom_ms(), (500, 1));
    assert_eq!(decoded[0].buffer().dimensions(), (4, 4));
    let p = decoded[1].buffer().get_pixel(0, 0).0;
    assert!(p[2] > 200 && p[0] < 50);
}

#[test]
fn looped_output_carries_netscape_extension() {
    let frames = vec![Raster::blank(2, 2).unwrap()];
    let bytes = GifLoopEncoder::default().encode(&frames, 500, true).unwrap();
    let needle = b"NETSCAPE2.0";
    assert!(bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn empty_sequence_is_an_error() {
    let err = GifLoopEncoder::default().encode(&[], 500, true).unwrap_err();
    assert!(matches!(err, RadarError::Encode(_)));
}

#[test]
fn out_of_range_speed_is_rejected() {
    let frames = vec![Raster::blank(2, 2).unwrap()];
    let err = GifLoopEncoder { speed: 0 }
        .encode(&frames, 500, true)
        .unwrap_err();
    assert!(matches!(err, RadarError::Validation(_)));
}

#[test]
fn timed_encode_writes_each_frame_delay() {
    let frames = vec![Raster::blank(2, 2).unwrap(), Raster::blank(2, 2).unwrap()];
    let bytes = GifLoopEncoder::default()
        .encode_timed(&frames, &[100, 400], true)
        .unwrap();
    let delays: Vec<(u32, u32)> = decode_frames(&bytes)
        .iter()
        .map(|f| f.delay().numer_denom_ms())
        .collect();
    assert_eq!(delays, vec![(100, 1), (400, 1)]);
}

#[test]
fn timed_encode_rejects_delay_count_mismatch() {
    let frames = vec![Raster::blank(2, 2).unwrap()];
    let err = GifLoopEncoder::default()
        .encode_timed(&frames, &[100, 200], true)
        .unwrap_err();
    assert!(matches!(err, RadarError::Validation(_)));
}
