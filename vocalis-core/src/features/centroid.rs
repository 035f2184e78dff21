//! Spectral centroid: frequency-weighted mean of the magnitude spectrum.
//!
//! Each frame is Hamming-windowed and transformed with rustfft; only the
//! real-input half of the spectrum (bins `0..=N/2`) contributes. The centroid
//! is `sum((k+1)·|X_k|) / sum(|X_k|)`, reported in one-based bin units so a
//! DC-only frame scores 1, not 0. Low values mean low-frequency-weighted
//! (voiced) content, high values broadband content.

use std::f32::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

/// Spectral centroid for each non-overlapping frame.
///
/// Expects normalized input and a positive `frame_len`. Frames with an
/// all-zero spectrum (digital silence) report a centroid of 0.
pub(crate) fn frame_centroids(samples: &[f32], frame_len: usize) -> Vec<f32> {
    let mut planner = FftPlanner::<f32>::new();
    let mut out = Vec::with_capacity(samples.len().div_ceil(frame_len));

    for frame in samples.chunks(frame_len) {
        let window = hamming_window(frame.len());
        // At most two plan sizes per signal (full frames plus one tail size);
        // the planner caches them.
        let fft = planner.plan_fft_forward(frame.len());
        let mut buf: Vec<Complex<f32>> = frame
            .iter()
            .zip(&window)
            .map(|(s, w)| Complex::new(s * w, 0.0))
            .collect();
        fft.process(&mut buf);

        // Real input: bins above N/2 mirror the lower half.
        let mut weighted = 0.0f32;
        let mut magnitude_sum = 0.0f32;
        for (k, bin) in buf.iter().take(frame.len() / 2 + 1).enumerate() {
            let magnitude = bin.norm();
            weighted += (k as f32 + 1.0) * magnitude;
            magnitude_sum += magnitude;
        }
        out.push(if magnitude_sum > 0.0 {
            weighted / magnitude_sum
        } else {
            0.0
        });
    }
    out
}

/// Hamming window of length `n`; `[1.0]` for a single-sample window.
fn hamming_window(n: usize) -> Vec<f32> {
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f32 / (n - 1) as f32).cos())
        .collect()
}
