//! Speech masks: per-frame decisions, sample-level broadcast, and boundary
//! extension.
//!
//! ## Pipeline position
//!
//! ```text
//! energy/centroid series ──AND──► frame mask ──broadcast──► sample mask
//!                                                               │
//!                                                      boundary extension
//!                                                    (lead-in + trail-out)
//! ```

/// Per-frame speech decision: louder than the energy threshold and
/// spectrally darker than the centroid threshold.
///
/// Both series come from the same framing pass and have equal length.
pub fn frame_decisions(
    energy: &[f32],
    centroid: &[f32],
    energy_threshold: f32,
    centroid_threshold: f32,
) -> Vec<bool> {
    energy
        .iter()
        .zip(centroid)
        .map(|(&e, &c)| e > energy_threshold && c < centroid_threshold)
        .collect()
}

/// Broadcast a frame mask to sample resolution.
///
/// Every sample inherits the decision of the frame containing it; the tail
/// frame may cover fewer than `frame_len` samples.
pub fn broadcast_frames(frame_mask: &[bool], frame_len: usize, signal_len: usize) -> Vec<bool> {
    let mut mask = vec![false; signal_len];
    for (i, &speech) in frame_mask.iter().enumerate() {
        if !speech {
            continue;
        }
        let start = (i * frame_len).min(signal_len);
        let end = ((i + 1) * frame_len).min(signal_len);
        mask[start..end].fill(true);
    }
    mask
}

/// Widen the speech regions of `mask` around the transitions of `frame_mask`.
///
/// Each silence-to-speech transition marks the `extend_len` samples before
/// the frame boundary (lead-in); each speech-to-silence transition marks the
/// `extend_len` samples after it (trail-out). Ranges clip to the mask; runs
/// touching the first or last frame have no transition there and get no
/// extension. Extensions depend only on `frame_mask`, so re-applying this to
/// an already extended mask changes nothing.
pub fn extend_boundaries(
    mask: &mut [bool],
    frame_mask: &[bool],
    frame_len: usize,
    extend_len: usize,
) {
    let len = mask.len();
    let mut set = |from: usize, to: usize| {
        let to = to.min(len);
        let from = from.min(to);
        mask[from..to].fill(true);
    };

    for i in 1..frame_mask.len() {
        let boundary = i * frame_len;
        if frame_mask[i] && !frame_mask[i - 1] {
            set(boundary.saturating_sub(extend_len), boundary);
        }
        if frame_mask[i - 1] && !frame_mask[i] {
            set(boundary, boundary + extend_len);
        }
    }
}

/// Broadcast plus boundary extension in one call: the full step from frame
/// decisions to the final sample mask.
pub fn post_process(
    frame_mask: &[bool],
    frame_len: usize,
    signal_len: usize,
    extend_len: usize,
) -> Vec<bool> {
    let mut mask = broadcast_frames(frame_mask, frame_len, signal_len);
    extend_boundaries(&mut mask, frame_mask, frame_len, extend_len);
    mask
}

/// Zero out the samples a mask marks as non-speech.
///
/// Expects `mask.len() == samples.len()` (the detector guarantees this);
/// pairs are consumed in lockstep.
pub fn apply_mask(samples: &[f32], mask: &[bool]) -> Vec<f32> {
    samples
        .iter()
        .zip(mask)
        .map(|(&s, &keep)| if keep { s } else { 0.0 })
        .collect()
}
