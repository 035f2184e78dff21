//! Adaptive decision thresholds from feature histograms.
//!
//! ## Idea
//!
//! Speech/silence feature distributions are roughly bimodal: a tall mode at
//! the silence floor and a smaller mode where speech lives. The threshold is
//! placed between the two dominant histogram peaks, pulled toward the lower
//! one. When the distribution shows no such pair (short or uniform
//! recordings), the series mean is used instead.

use crate::error::{Result, VocalisError};

/// Equal-width histogram over the observed range of a feature series.
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: Vec<usize>,
    edges: Vec<f32>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their range.
    ///
    /// The last bin is closed on the right so the maximum lands in it. A
    /// constant series gets its degenerate range widened to
    /// `[v - 0.5, v + 0.5]`; an empty series spans `[0, 1]` with zero
    /// counts. Returns [`VocalisError::EmptyHistogram`] when `bins` is zero.
    pub fn new(values: &[f32], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(VocalisError::EmptyHistogram);
        }

        let (mut lo, mut hi) = range(values);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f32;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = ((v - lo) / width) as usize;
            counts[idx.min(bins - 1)] += 1;
        }
        let edges = (0..=bins).map(|i| lo + width * i as f32).collect();
        Ok(Self { counts, edges })
    }

    /// Bin counts, one per bin.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Bin edges; `counts().len() + 1` entries.
    pub fn edges(&self) -> &[f32] {
        &self.edges
    }

    /// Midpoint of bin `i`.
    pub fn bin_center(&self, i: usize) -> f32 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }
}

fn range(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}

/// Dominant histogram peaks as ascending bin-center values, at most two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramPeaks {
    centers: Vec<f32>,
}

impl HistogramPeaks {
    /// Peak centers in ascending order (0, 1, or 2 entries).
    pub fn centers(&self) -> &[f32] {
        &self.centers
    }

    /// True when two distinct peaks were found.
    pub fn is_bimodal(&self) -> bool {
        self.centers.len() == 2
    }
}

/// Locate up to two dominant peaks in a histogram.
///
/// A qualifying bin must rise above `0.02 ×` the mean bin count, above both
/// immediate neighbors (boundary bins compare against their one neighbor),
/// and above the weaker of the peaks already held. On a find, the weaker
/// slot is replaced and the scan skips the next bin, so adjacent bins never
/// both register; otherwise the scan advances one bin.
pub fn find_peaks(histogram: &Histogram) -> HistogramPeaks {
    let counts = histogram.counts();
    let mean_count = counts.iter().sum::<usize>() as f32 / counts.len() as f32;
    let bound = 0.02 * mean_count;

    // Peak slots hold bin indices; the weaker one is open for replacement.
    let mut slots: [Option<usize>; 2] = [None, None];
    let mut i = 0;
    while i < counts.len() {
        let held = [
            slots[0].map_or(0, |s| counts[s]),
            slots[1].map_or(0, |s| counts[s]),
        ];
        let weakest = if held[0] <= held[1] { 0 } else { 1 };

        let above_left = i == 0 || counts[i] > counts[i - 1];
        let above_right = i == counts.len() - 1 || counts[i] > counts[i + 1];
        let qualifies = counts[i] as f32 > bound
            && above_left
            && above_right
            && counts[i] > held[weakest];

        if qualifies {
            slots[weakest] = Some(i);
            i += 2;
        } else {
            i += 1;
        }
    }

    let mut centers: Vec<f32> = slots
        .iter()
        .flatten()
        .map(|&s| histogram.bin_center(s))
        .collect();
    centers.sort_by(|a, b| a.total_cmp(b));
    HistogramPeaks { centers }
}

/// Decision threshold for a feature series given its histogram peaks.
///
/// A bimodal series gets a weighted average of the two peak centers, pulled
/// toward the lower one by `weight`. Anything less than two peaks falls back
/// to the arithmetic mean of the raw series (0.0 for an empty series).
pub fn decision_threshold(series: &[f32], peaks: &HistogramPeaks, weight: f32) -> f32 {
    if let &[low, high] = peaks.centers() {
        (weight * low + high) / (weight + 1.0)
    } else {
        mean(series)
    }
}

/// Arithmetic mean, 0.0 on an empty slice.
fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}
