use std::io::Cursor;

use super::*;

fn encode_png(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let raster = decode_image(&encode_png(img)).unwrap();
    assert_eq!(raster.dimensions(), (1, 1));
    assert_eq!(
        raster.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rgb_input_becomes_opaque_rgba() {
    let img = image::RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let raster = decode_image(&buf).unwrap();
    assert_eq!(raster.pixel(1, 0), Some([4, 5, 6, 255]));
}

#[test]
fn decode_garbage_fails() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn from_premul_checks_length() {
    assert!(Raster::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(Raster::from_premul(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn transparent_pixels_round_trip_to_zero() {
    let raster = Raster::solid(1, 1, [200, 100, 50, 0]).unwrap();
    assert_eq!(raster.rgba8_premul.as_slice(), &[0, 0, 0, 0]);
    assert_eq!(raster.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(raster.pixel(1, 0), None);
}

#[test]
fn blank_is_opaque_black() {
    let raster = Raster::blank(3, 2).unwrap();
    let img = raster.to_rgba_image().unwrap();
    assert_eq!(img.dimensions(), (3, 2));
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

fn encode_gif(frames: &[(u8, u32)]) -> Vec<u8> {
    use image::codecs::gif::{GifEncoder, Repeat};

    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder.set_repeat(Repeat::Infinite).unwrap();
        for &(red, ms) in frames {
            let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([red, 0, 0, 255]));
            let delay = image::Delay::from_numer_denom_ms(ms, 1);
            encoder
                .encode_frame(image::Frame::from_parts(img, 0, 0, delay))
                .unwrap();
        }
    }
    buf
}

#[test]
fn decode_animation_keeps_every_gif_frame_and_delay() {
    let bytes = encode_gif(&[(255, 200), (0, 300), (255, 700)]);
    let frames = decode_animation(&bytes).unwrap();
    assert_eq!(frames.len(), 3);
    let delays: Vec<Option<u32>> = frames.iter().map(|f| f.delay_ms).collect();
    assert_eq!(delays, vec![Some(200), Some(300), Some(700)]);
    assert_eq!(frames[1].raster.dimensions(), (3, 2));
    assert!(frames[0].raster.pixel(0, 0).unwrap()[0] > 200);
    assert!(frames[1].raster.pixel(0, 0).unwrap()[0] < 50);
}

#[test]
fn decode_animation_of_still_png_is_one_undelayed_frame() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 255]));
    let frames = decode_animation(&encode_png(img)).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].delay_ms, None);
    assert_eq!(frames[0].raster.dimensions(), (2, 2));
}

#[test]
fn decode_animation_rejects_garbage() {
    assert!(decode_animation(b"GIF89a-truncated").is_err());
}
