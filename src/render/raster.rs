use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use crate::foundation::error::{RadarError, RadarResult};

/// Decoded RGBA8 raster.
///
/// Pixels are premultiplied, row-major and tightly packed. The buffer is shared so that cached
/// static layers and held loop frames can be cloned cheaply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Raster {
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> RadarResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(RadarError::validation(format!(
                "raster data is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        })
    }

    /// Build from straight (non-premultiplied) RGBA8 pixels.
    pub fn from_straight(width: u32, height: u32, mut data: Vec<u8>) -> RadarResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul(width, height, data)
    }

    /// Single-colour raster; `rgba` is straight alpha.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RadarResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / 4 {
            data.extend_from_slice(&rgba);
        }
        Self::from_straight(width, height, data)
    }

    /// Opaque black raster used when no frames exist.
    pub fn blank(width: u32, height: u32) -> RadarResult<Self> {
        Self::solid(width, height, [0, 0, 0, 255])
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Straight-alpha pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[idx..idx + 4];
        Some(unpremultiply([p[0], p[1], p[2], p[3]]))
    }

    /// Convert to a straight-alpha `image::RgbaImage` for encoding.
    pub fn to_rgba_image(&self) -> RadarResult<image::RgbaImage> {
        let mut data = self.rgba8_premul.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data).ok_or_else(|| {
            RadarError::validation("raster buffer does not match its dimensions")
        })
    }
}

/// Decode any supported image format and convert it to RGBA.
pub fn decode_image(bytes: &[u8]) -> RadarResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Raster::from_straight(width, height, rgba.into_raw())
}

/// One frame of a possibly animated source image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationFrame {
    pub raster: Raster,
    /// Display time from the source, if it carries one.
    pub delay_ms: Option<u32>,
}

/// Decode every frame of an animated GIF. Other formats yield a single frame without a delay.
///
/// Frames are full-canvas composites, so partial GIF frames come out at the logical screen size.
pub fn decode_animation(bytes: &[u8]) -> RadarResult<Vec<AnimationFrame>> {
    if image::guess_format(bytes).ok() != Some(image::ImageFormat::Gif) {
        return Ok(vec![AnimationFrame {
            raster: decode_image(bytes)?,
            delay_ms: None,
        }]);
    }

    let decoder = GifDecoder::new(Cursor::new(bytes)).context("read gif header")?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .context("decode gif frames")?;
    if frames.is_empty() {
        return Err(RadarError::validation("animation contains no frames"));
    }

    frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay_ms = if denom == 0 { 0 } else { numer / denom };
            let buffer = frame.into_buffer();
            let (width, height) = buffer.dimensions();
            Ok(AnimationFrame {
                raster: Raster::from_straight(width, height, buffer.into_raw())?,
                delay_ms: Some(delay_ms),
            })
        })
        .collect()
}

fn byte_len(width: u32, height: u32) -> RadarResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| RadarError::validation("raster size overflow"))
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3] as u32;
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2]), px[3]]
        }
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = unpremultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
