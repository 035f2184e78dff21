//! Median smoothing for frame feature series.
//!
//! Single-frame outliers (clicks, breaths) would otherwise register as their
//! own histogram mass and distort the peak search. A short median filter
//! knocks them out while leaving genuine plateaus alone.

/// Median filter with a centered window and zero-padded edges.
///
/// Output length equals input length. Even window lengths are widened to the
/// next odd length so the window stays centered; a window of 1 is the
/// identity.
pub fn median_filter(series: &[f32], window: usize) -> Vec<f32> {
    let window = window.max(1) | 1;
    let half = window / 2;
    let mut scratch = Vec::with_capacity(window);

    (0..series.len())
        .map(|i| {
            scratch.clear();
            for offset in 0..window {
                let j = (i + offset) as isize - half as isize;
                if j < 0 || j as usize >= series.len() {
                    scratch.push(0.0);
                } else {
                    scratch.push(series[j as usize]);
                }
            }
            scratch.sort_by(|a, b| a.total_cmp(b));
            scratch[half]
        })
        .collect()
}

/// Two passes of [`median_filter`] with the same window.
///
/// The first pass removes narrow spikes; the second settles plateau edges
/// the first pass may have shifted.
pub fn smooth(series: &[f32], window: usize) -> Vec<f32> {
    median_filter(&median_filter(series, window), window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_spike_is_removed() {
        let filtered = median_filter(&[0.0, 0.0, 9.0, 0.0, 0.0], 3);
        assert_eq!(filtered, vec![0.0; 5]);
    }

    #[test]
    fn window_of_one_is_identity() {
        let series = [0.3, 0.7, 0.1];
        assert_eq!(median_filter(&series, 1), series.to_vec());
    }

    #[test]
    fn output_length_matches_input() {
        let series = vec![1.0f32; 17];
        assert_eq!(median_filter(&series, 5).len(), 17);
        assert_eq!(smooth(&series, 5).len(), 17);
        assert!(median_filter(&[], 5).is_empty());
    }

    #[test]
    fn edges_see_zero_padding() {
        // A window of 5 over two samples is majority padding, so the
        // zero median wins everywhere.
        assert_eq!(median_filter(&[9.0, 9.0], 5), vec![0.0, 0.0]);
    }

    #[test]
    fn even_window_widens_to_next_odd() {
        let series = [0.0, 5.0, 0.0, 5.0, 0.0, 5.0];
        assert_eq!(median_filter(&series, 4), median_filter(&series, 5));
    }

    #[test]
    fn second_pass_keeps_settling_the_series() {
        let series = [9.0, 0.0, 9.0, 0.0, 9.0];
        assert_eq!(median_filter(&series, 3), vec![0.0, 9.0, 0.0, 9.0, 0.0]);
        assert_eq!(smooth(&series, 3), vec![0.0, 0.0, 9.0, 0.0, 0.0]);
    }
}
