//! Short-time energy: mean squared amplitude per frame.

/// Mean of squared samples for each non-overlapping frame.
///
/// Expects normalized input and a positive `frame_len`. The tail frame may
/// be shorter and is averaged over its own length.
pub(crate) fn frame_energies(samples: &[f32], frame_len: usize) -> Vec<f32> {
    samples
        .chunks(frame_len)
        .map(|frame| {
            let sum_sq: f32 = frame.iter().map(|s| s * s).sum();
            sum_sq / frame.len() as f32
        })
        .collect()
}
