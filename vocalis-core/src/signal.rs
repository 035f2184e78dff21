//! Typed sample buffer handed to the detector by the caller's audio loader.

/// A mono recording at a known sample rate.
///
/// Supplied once by the caller and never mutated by the detector; every
/// derived artifact (feature series, masks, segments) is a fresh allocation.
#[derive(Debug, Clone)]
pub struct Signal {
    /// Mono f32 samples, arbitrary amplitude range.
    pub samples: Vec<f32>,
    /// Sample rate in Hz (e.g. 1000, 16000, 44100).
    pub sample_rate: u32,
}

impl Signal {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples in the recording.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the recording contains no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the recording in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
