use crate::foundation::error::{RadarError, RadarResult};
use crate::render::raster::Raster;

/// Extra copies of the last frame appended so the loop visibly pauses.
pub const HOLD_FRAMES: usize = 2;

/// Display time of each loop frame.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 500;

/// Size of the placeholder frame when no base raster is known.
pub const PLACEHOLDER_SIZE: (u32, u32) = (600, 550);

/// Encodes an ordered frame sequence into an animation.
pub trait LoopEncoder: Send + Sync {
    /// Encode with a display time per frame. `delays_ms` has one entry per frame.
    fn encode_timed(
        &self,
        frames: &[Raster],
        delays_ms: &[u32],
        looped: bool,
    ) -> RadarResult<Vec<u8>>;

    /// Encode with the same display time for every frame.
    fn encode(
        &self,
        frames: &[Raster],
        frame_duration_ms: u32,
        looped: bool,
    ) -> RadarResult<Vec<u8>> {
        self.encode_timed(frames, &vec![frame_duration_ms; frames.len()], looped)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopOpts {
    pub hold_frames: usize,
    pub frame_duration_ms: u32,
    /// Dimensions of the placeholder frame emitted for an empty loop.
    pub placeholder_size: (u32, u32),
}

impl Default for LoopOpts {
    fn default() -> Self {
        Self {
            hold_frames: HOLD_FRAMES,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
            placeholder_size: PLACEHOLDER_SIZE,
        }
    }
}

/// Final frame order: the composited frames plus `hold_frames` copies of the last one, or a
/// single blank placeholder when there are no frames.
pub fn assemble_loop(frames: &[Raster], opts: &LoopOpts) -> RadarResult<Vec<Raster>> {
    let Some(last) = frames.last() else {
        let (w, h) = opts.placeholder_size;
        tracing::debug!(width = w, height = h, "no frames, emitting placeholder");
        return Ok(vec![Raster::blank(w, h)?]);
    };
    let mut out = Vec::with_capacity(frames.len() + opts.hold_frames);
    out.extend_from_slice(frames);
    out.extend(std::iter::repeat_n(last.clone(), opts.hold_frames));
    Ok(out)
}

/// Assemble and encode as an infinitely repeating loop.
pub fn encode_loop(
    encoder: &dyn LoopEncoder,
    frames: &[Raster],
    opts: &LoopOpts,
) -> RadarResult<Vec<u8>> {
    let sequence = assemble_loop(frames, opts)?;
    encoder.encode(&sequence, opts.frame_duration_ms, true)
}

/// Like [`encode_loop`], but each frame keeps its own display time.
///
/// Hold frames reuse the last frame's delay; the placeholder uses `opts.frame_duration_ms`.
pub fn encode_loop_timed(
    encoder: &dyn LoopEncoder,
    frames: &[Raster],
    delays_ms: &[u32],
    opts: &LoopOpts,
) -> RadarResult<Vec<u8>> {
    if delays_ms.len() != frames.len() {
        return Err(RadarError::validation(format!(
            "{} frame delays for {} frames",
            delays_ms.len(),
            frames.len()
        )));
    }
    let sequence = assemble_loop(frames, opts)?;
    let mut delays = delays_ms.to_vec();
    let fill = delays.last().copied().unwrap_or(opts.frame_duration_ms);
    delays.resize(sequence.len(), fill);
    encoder.encode_timed(&sequence, &delays, true)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/assemble.rs"]
mod tests;
