//! `SpeechDetector`: the batch detection façade.
//!
//! ## Pipeline
//!
//! ```text
//! Signal
//!   └─► features::extract            energy + centroid per frame
//!         └─► smoothing::smooth      reported; decisions use the raw series
//!         └─► threshold              histogram → peaks → threshold, per feature
//!               └─► mask::frame_decisions   energy AND centroid
//!                     └─► mask::post_process broadcast + boundary extension
//!                           └─► segments::encode_mask
//! ```
//!
//! One `detect` call is one deterministic batch pass; the detector holds only
//! configuration and no state between calls.

use tracing::{debug, info};

use crate::{
    error::{Result, VocalisError},
    features::{self, FrameFeatures},
    mask,
    segments::{self, SpeechSegment},
    signal::Signal,
    smoothing,
    threshold::{self, Histogram, HistogramPeaks},
};

/// Configuration for `SpeechDetector`.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Analysis frame length in seconds; the frame length in samples is
    /// `round(window_secs × sample_rate)`. Default: 0.025 (25 ms).
    pub window_secs: f64,
    /// Histogram resolution per feature: `round(bins_per_hz × sample_rate)`
    /// bins. Default: 0.002.
    pub bins_per_hz: f64,
    /// Mixing weight pulling a bimodal threshold toward the lower peak.
    /// Default: 5.0.
    pub peak_weight: f32,
    /// Boundary extension in frames: speech regions grow by
    /// `extend_frames × frame length` samples at each detected edge.
    /// Default: 5.
    pub extend_frames: usize,
    /// Median filter window (in frames) for the reported smoothed series.
    /// Default: 5.
    pub median_window: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_secs: 0.025,
            bins_per_hz: 0.002,
            peak_weight: 5.0,
            extend_frames: 5,
            median_window: 5,
        }
    }
}

impl DetectorConfig {
    /// Frame length in samples at `sample_rate`.
    ///
    /// # Errors
    /// [`VocalisError::EmptyFrameWindow`] when the window rounds to zero
    /// samples at this rate.
    pub fn frame_len(&self, sample_rate: u32) -> Result<usize> {
        let len = (self.window_secs * sample_rate as f64).round() as usize;
        if len == 0 {
            return Err(VocalisError::EmptyFrameWindow);
        }
        Ok(len)
    }

    /// Histogram bin count at `sample_rate`.
    ///
    /// # Errors
    /// [`VocalisError::EmptyHistogram`] when the bin count rounds to zero
    /// at this rate.
    pub fn histogram_bins(&self, sample_rate: u32) -> Result<usize> {
        let bins = (self.bins_per_hz * sample_rate as f64).round() as usize;
        if bins == 0 {
            return Err(VocalisError::EmptyHistogram);
        }
        Ok(bins)
    }

    /// Boundary extension length in samples for a given frame length.
    pub fn extend_len(&self, frame_len: usize) -> usize {
        self.extend_frames * frame_len
    }
}

/// Everything the detector derived from one feature series.
#[derive(Debug, Clone)]
pub struct FeatureAnalysis {
    /// Raw per-frame values; these drive the threshold and the mask.
    pub series: Vec<f32>,
    /// Two-pass median filtered copy of `series`, carried for inspection
    /// and plotting tools.
    pub smoothed: Vec<f32>,
    /// Histogram the peak search ran on.
    pub histogram: Histogram,
    /// Dominant histogram peaks (at most two).
    pub peaks: HistogramPeaks,
    /// Decision threshold for this feature.
    pub threshold: f32,
}

/// Result of one batch detection pass.
#[derive(Debug, Clone)]
pub struct Detection {
    sample_rate: u32,
    /// Frame length in samples used for this pass.
    pub frame_len: usize,
    /// Energy analysis; a frame must exceed this threshold.
    pub energy: FeatureAnalysis,
    /// Centroid analysis; a frame must stay below this threshold.
    pub centroid: FeatureAnalysis,
    /// Per-frame speech decisions.
    pub frame_mask: Vec<bool>,
    /// Final per-sample speech decisions, boundary-extended.
    pub sample_mask: Vec<bool>,
}

impl Detection {
    /// Sample rate of the analyzed signal.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Encode the sample mask into labeled segments.
    pub fn segments(&self, label: &str) -> Vec<SpeechSegment> {
        segments::encode_mask(&self.sample_mask, self.sample_rate, label)
    }

    /// Number of samples marked as speech.
    pub fn speech_samples(&self) -> usize {
        self.sample_mask.iter().filter(|&&s| s).count()
    }

    /// Fraction of the signal marked as speech (0.0 for an empty signal).
    pub fn speech_ratio(&self) -> f64 {
        if self.sample_mask.is_empty() {
            return 0.0;
        }
        self.speech_samples() as f64 / self.sample_mask.len() as f64
    }
}

/// Offline speech detector over a whole recording.
#[derive(Debug, Clone, Default)]
pub struct SpeechDetector {
    config: DetectorConfig,
}

impl SpeechDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run the full detection pass over `signal`.
    ///
    /// # Errors
    /// [`VocalisError::EmptyFrameWindow`] or [`VocalisError::EmptyHistogram`]
    /// when the configured window or bin count resolves to zero at this
    /// sample rate. Degenerate signals (empty, constant, all-silent) are not
    /// errors and produce empty or all-false masks.
    pub fn detect(&self, signal: &Signal) -> Result<Detection> {
        let frame_len = self.config.frame_len(signal.sample_rate)?;
        let bins = self.config.histogram_bins(signal.sample_rate)?;
        let extend_len = self.config.extend_len(frame_len);

        let FrameFeatures { energy, centroid } = features::extract(&signal.samples, frame_len)?;
        debug!(
            frames = energy.len(),
            frame_len,
            bins,
            extend_len,
            "extracted frame features"
        );

        let energy = self.analyze(energy, bins)?;
        let centroid = self.analyze(centroid, bins)?;
        debug!(
            energy_threshold = format_args!("{:.6}", energy.threshold),
            energy_bimodal = energy.peaks.is_bimodal(),
            centroid_threshold = format_args!("{:.4}", centroid.threshold),
            centroid_bimodal = centroid.peaks.is_bimodal(),
            "estimated decision thresholds"
        );

        let frame_mask = mask::frame_decisions(
            &energy.series,
            &centroid.series,
            energy.threshold,
            centroid.threshold,
        );
        let sample_mask = mask::post_process(&frame_mask, frame_len, signal.len(), extend_len);

        let detection = Detection {
            sample_rate: signal.sample_rate,
            frame_len,
            energy,
            centroid,
            frame_mask,
            sample_mask,
        };
        info!(
            frames = detection.frame_mask.len(),
            speech_frames = detection.frame_mask.iter().filter(|&&s| s).count(),
            speech_ratio = format_args!("{:.3}", detection.speech_ratio()),
            "speech detection complete"
        );
        Ok(detection)
    }

    /// Smooth, histogram, and threshold one feature series.
    fn analyze(&self, series: Vec<f32>, bins: usize) -> Result<FeatureAnalysis> {
        let smoothed = smoothing::smooth(&series, self.config.median_window);
        let histogram = Histogram::new(&series, bins)?;
        let peaks = threshold::find_peaks(&histogram);
        let threshold = threshold::decision_threshold(&series, &peaks, self.config.peak_weight);
        Ok(FeatureAnalysis {
            series,
            smoothed,
            histogram,
            peaks,
            threshold,
        })
    }
}
