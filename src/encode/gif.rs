use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::encode::assemble::LoopEncoder;
use crate::foundation::error::{RadarError, RadarResult};
use crate::render::raster::Raster;

/// Animated GIF output via the `image` crate.
#[derive(Clone, Copy, Debug)]
pub struct GifLoopEncoder {
    /// Quantization speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for GifLoopEncoder {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

impl LoopEncoder for GifLoopEncoder {
    fn encode_timed(
        &self,
        frames: &[Raster],
        delays_ms: &[u32],
        looped: bool,
    ) -> RadarResult<Vec<u8>> {
        if frames.is_empty() {
            return Err(RadarError::encode("gif needs at least one frame"));
        }
        if delays_ms.len() != frames.len() {
            return Err(RadarError::validation(format!(
                "{} frame delays for {} frames",
                delays_ms.len(),
                frames.len()
            )));
        }
        if !(1..=30).contains(&self.speed) {
            return Err(RadarError::validation("gif speed must be within 1..=30"));
        }

        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut buf, self.speed);
            let repeat = if looped {
                Repeat::Infinite
            } else {
                Repeat::Finite(0)
            };
            encoder
                .set_repeat(repeat)
                .map_err(|e| RadarError::encode(format!("set gif repeat: {e}")))?;

            for (i, (raster, &ms)) in frames.iter().zip(delays_ms).enumerate() {
                let delay = Delay::from_numer_denom_ms(ms, 1);
                let frame = Frame::from_parts(raster.to_rgba_image()?, 0, 0, delay);
                encoder
                    .encode_frame(frame)
                    .map_err(|e| RadarError::encode(format!("encode gif frame {i}: {e}")))?;
            }
        }
        tracing::debug!(frames = frames.len(), bytes = buf.len(), "encoded gif loop");
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
