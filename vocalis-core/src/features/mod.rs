//! Frame-level feature extraction: short-time energy and spectral centroid.
//!
//! The signal is peak-normalized once, split into fixed-length
//! non-overlapping frames (the final frame may be short), and reduced to one
//! scalar per frame per feature. Both series feed the adaptive thresholds
//! downstream.

mod centroid;
mod energy;

use crate::error::{Result, VocalisError};

/// Per-frame feature series extracted in a single pass over the signal.
///
/// Both series have length `frame_count(samples.len(), frame_len)`.
#[derive(Debug, Clone)]
pub struct FrameFeatures {
    /// Mean squared amplitude per frame, from the normalized signal.
    pub energy: Vec<f32>,
    /// Hamming-windowed spectral centroid per frame, in one-based bin units.
    pub centroid: Vec<f32>,
}

/// Extract both feature series from a raw sample buffer.
///
/// The buffer is normalized once, then each frame is reduced to its
/// short-time energy and spectral centroid. Returns
/// [`VocalisError::EmptyFrameWindow`] when `frame_len` is zero; an empty
/// buffer yields empty series.
pub fn extract(samples: &[f32], frame_len: usize) -> Result<FrameFeatures> {
    if frame_len == 0 {
        return Err(VocalisError::EmptyFrameWindow);
    }
    let normalized = normalize(samples);
    Ok(FrameFeatures {
        energy: energy::frame_energies(&normalized, frame_len),
        centroid: centroid::frame_centroids(&normalized, frame_len),
    })
}

/// Number of frames a buffer of `len` samples yields at `frame_len` samples
/// per frame, counting a partial tail frame.
///
/// `frame_len` must be positive; [`extract`] validates this up front.
pub fn frame_count(len: usize, frame_len: usize) -> usize {
    len.div_ceil(frame_len)
}

/// Scale a buffer so its largest absolute sample is 1.0.
///
/// A silent (all-zero) buffer is returned unchanged rather than divided by
/// zero.
pub fn normalize(samples: &[f32]) -> Vec<f32> {
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    if peak > 0.0 {
        samples.iter().map(|s| s / peak).collect()
    } else {
        samples.to_vec()
    }
}
