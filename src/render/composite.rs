use rayon::prelude::*;

use crate::foundation::error::{RadarError, RadarResult};
use crate::render::raster::Raster;

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> RadarResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RadarError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Layer `layers` over `base`, bottom first. Output has the base raster's dimensions.
pub fn composite_stack(base: &Raster, layers: &[&Raster]) -> RadarResult<Raster> {
    let mut data = base.rgba8_premul.as_ref().clone();
    for (i, layer) in layers.iter().enumerate() {
        if layer.dimensions() != base.dimensions() {
            return Err(RadarError::validation(format!(
                "layer {i} is {}x{}, base is {}x{}",
                layer.width, layer.height, base.width, base.height
            )));
        }
        over_in_place(&mut data, &layer.rgba8_premul)?;
    }
    Raster::from_premul(base.width, base.height, data)
}

/// Per-scan rasters for one aligned timestamp.
#[derive(Clone, Copy, Debug)]
pub struct ScanLayers<'a> {
    pub radar: &'a Raster,
    pub legend: &'a Raster,
    pub warning: &'a Raster,
}

/// Z-order: base < radar < overlays (in order) < legend < warning.
pub fn compose_frame(
    base: &Raster,
    overlays: &[Raster],
    scan: ScanLayers<'_>,
) -> RadarResult<Raster> {
    let mut stack = Vec::with_capacity(overlays.len() + 3);
    stack.push(scan.radar);
    stack.extend(overlays.iter());
    stack.push(scan.legend);
    stack.push(scan.warning);
    composite_stack(base, &stack)
}

/// Composite every aligned index, preserving order.
///
/// The three series must have equal length; frames are composited in parallel on the current
/// rayon pool.
pub fn compose_frames(
    base: &Raster,
    overlays: &[Raster],
    radar: &[Raster],
    legend: &[Raster],
    warning: &[Raster],
) -> RadarResult<Vec<Raster>> {
    if radar.len() != legend.len() || radar.len() != warning.len() {
        return Err(RadarError::validation(format!(
            "frame series lengths differ (radar={}, legend={}, warning={})",
            radar.len(),
            legend.len(),
            warning.len()
        )));
    }
    (0..radar.len())
        .into_par_iter()
        .map(|i| {
            compose_frame(
                base,
                overlays,
                ScanLayers {
                    radar: &radar[i],
                    legend: &legend[i],
                    warning: &warning[i],
                },
            )
        })
        .collect()
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
