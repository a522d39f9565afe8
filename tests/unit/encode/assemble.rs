use std::sync::Mutex;

use super::*;

#[derive(Default)]
struct CapturingEncoder {
    calls: Mutex<Vec<(usize, Vec<u32>, bool)>>,
}

impl LoopEncoder for CapturingEncoder {
    fn encode_timed(&self, frames: &[Raster], ms: &[u32], looped: bool) -> RadarResult<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((frames.len(), ms.to_vec(), looped));
        Ok(vec![frames.len() as u8])
    }
}

fn frame(v: u8) -> Raster {
    Raster::solid(2, 2, [v, v, v, 255]).unwrap()
}

#[test]
fn appends_two_copies_of_last_frame() {
    let frames = vec![frame(1), frame(2), frame(3)];
    let out = assemble_loop(&frames, &LoopOpts::default()).unwrap();
    assert_eq!(out.len(), 5);
    assert_eq!(out[..3], frames[..]);
    assert_eq!(out[3], frames[2]);
    assert_eq!(out[4], frames[2]);
}

#[test]
fn single_frame_becomes_three() {
    let out = assemble_loop(&[frame(7)], &LoopOpts::default()).unwrap();
    assert_eq!(out.len(), 3);
}

#[test]
fn empty_input_yields_one_placeholder() {
    let opts = LoopOpts {
        placeholder_size: (4, 3),
        ..LoopOpts::default()
    };
    let out = assemble_loop(&[], &opts).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].dimensions(), (4, 3));
    assert_eq!(out[0].pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn zero_hold_keeps_frames_as_is() {
    let opts = LoopOpts {
        hold_frames: 0,
        ..LoopOpts::default()
    };
    assert_eq!(assemble_loop(&[frame(1)], &opts).unwrap().len(), 1);
}

#[test]
fn encode_loop_passes_duration_and_loop_flag() {
    let encoder = CapturingEncoder::default();
    let bytes = encode_loop(&encoder, &[frame(1), frame(2)], &LoopOpts::default()).unwrap();
    assert_eq!(bytes, vec![4]);
    assert_eq!(
        encoder.calls.lock().unwrap().as_slice(),
        &[(4, vec![DEFAULT_FRAME_DURATION_MS; 4], true)]
    );
}

#[test]
fn timed_loop_keeps_delays_and_extends_hold_with_last() {
    let encoder = CapturingEncoder::default();
    let opts = LoopOpts {
        hold_frames: 1,
        ..LoopOpts::default()
    };
    encode_loop_timed(&encoder, &[frame(1), frame(2)], &[120, 80], &opts).unwrap();
    assert_eq!(
        encoder.calls.lock().unwrap().as_slice(),
        &[(3, vec![120, 80, 80], true)]
    );
}

#[test]
fn timed_loop_without_frames_uses_default_duration() {
    let encoder = CapturingEncoder::default();
    encode_loop_timed(&encoder, &[], &[], &LoopOpts::default()).unwrap();
    assert_eq!(
        encoder.calls.lock().unwrap().as_slice(),
        &[(1, vec![DEFAULT_FRAME_DURATION_MS], true)]
    );
}

#[test]
fn timed_loop_rejects_delay_count_mismatch() {
    let encoder = CapturingEncoder::default();
    let err = encode_loop_timed(&encoder, &[frame(1)], &[], &LoopOpts::default()).unwrap_err();
    assert!(matches!(err, RadarError::Validation(_)));
    assert!(encoder.calls.lock().unwrap().is_empty());
}
