//! Run-length encoding of sample masks into labeled time segments.
//!
//! Downstream annotation consumers speak (onset, duration, label) triples, so
//! the encoder measures durations between the first and last sample of a run
//! rather than in whole sample periods. The re-expansion in
//! [`mask_from_segments`] is the exact inverse at the same sample rate.

use serde::{Deserialize, Serialize};

/// A maximal run of speech samples as onset plus duration in seconds.
///
/// Duration spans first to last sample of the run, so a single-sample run
/// has duration 0 rather than one sample period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechSegment {
    /// Time of the first sample of the run, in seconds.
    pub onset_secs: f64,
    /// Time between the first and last sample of the run, in seconds.
    pub duration_secs: f64,
    /// Caller-supplied tag, applied uniformly to every run of a pass.
    pub label: String,
}

impl SpeechSegment {
    /// Time of the last sample of the run, in seconds.
    pub fn end_secs(&self) -> f64 {
        self.onset_secs + self.duration_secs
    }
}

/// Run-length-encode a sample mask into time segments.
///
/// Scans the mask once: entering a run records its start, leaving one emits
/// the segment, and a run still open at the end of the buffer is closed at
/// the last sample.
pub fn encode_mask(mask: &[bool], sample_rate: u32, label: &str) -> Vec<SpeechSegment> {
    let mut segments = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &speech) in mask.iter().enumerate() {
        match (run_start, speech) {
            (None, true) => run_start = Some(i),
            (Some(start), false) => {
                segments.push(segment(start, i - 1, sample_rate, label));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        segments.push(segment(start, mask.len() - 1, sample_rate, label));
    }
    segments
}

fn segment(start: usize, end: usize, sample_rate: u32, label: &str) -> SpeechSegment {
    SpeechSegment {
        onset_secs: start as f64 / sample_rate as f64,
        duration_secs: (end - start) as f64 / sample_rate as f64,
        label: label.to_string(),
    }
}

/// Rebuild a sample mask from a segment list.
///
/// Each segment marks the samples from its onset through its final sample
/// inclusive; indices are rounded to the nearest sample and clipped to
/// `signal_len`. Inverse of [`encode_mask`] at the same sample rate.
pub fn mask_from_segments(
    segments: &[SpeechSegment],
    sample_rate: u32,
    signal_len: usize,
) -> Vec<bool> {
    let mut mask = vec![false; signal_len];
    for seg in segments {
        let start = (seg.onset_secs * sample_rate as f64).round() as usize;
        let end = (seg.end_secs() * sample_rate as f64).round() as usize;
        let hi = (end + 1).min(signal_len);
        let lo = start.min(hi);
        mask[lo..hi].fill(true);
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn encode(mask: &[bool]) -> Vec<SpeechSegment> {
        encode_mask(mask, 10, "speech")
    }

    #[test]
    fn single_run_becomes_one_segment() {
        let segments = encode(&[false, true, true, true, false]);
        assert_eq!(segments.len(), 1);
        assert_relative_eq!(segments[0].onset_secs, 0.1, epsilon = 1e-9);
        assert_relative_eq!(segments[0].duration_secs, 0.2, epsilon = 1e-9);
        assert_eq!(segments[0].label, "speech");
    }

    #[test]
    fn open_run_is_closed_at_the_last_sample() {
        let segments = encode(&[false, false, true, true]);
        assert_eq!(segments.len(), 1);
        assert_relative_eq!(segments[0].onset_secs, 0.2, epsilon = 1e-9);
        assert_relative_eq!(segments[0].duration_secs, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn single_sample_run_has_zero_duration() {
        let segments = encode(&[false, true, false]);
        assert_eq!(segments.len(), 1);
        assert_relative_eq!(segments[0].onset_secs, 0.1, epsilon = 1e-9);
        assert_eq!(segments[0].duration_secs, 0.0);
    }

    #[test]
    fn all_true_mask_is_one_full_segment() {
        let segments = encode(&[true; 10]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].onset_secs, 0.0);
        assert_relative_eq!(segments[0].duration_secs, 0.9, epsilon = 1e-9);
    }

    #[test]
    fn empty_and_all_false_masks_yield_nothing() {
        assert!(encode(&[]).is_empty());
        assert!(encode(&[false; 8]).is_empty());
    }

    #[test]
    fn segments_are_ordered_and_separated() {
        let segments = encode(&[true, false, true, true, false, false, true]);
        assert_eq!(segments.len(), 3);
        assert!(segments[0].end_secs() < segments[1].onset_secs);
        assert!(segments[1].end_secs() < segments[2].onset_secs);
    }

    #[test]
    fn mask_round_trips_through_segments_exactly() {
        // Includes a single-sample run and a run open at the buffer end.
        let mask = [false, true, true, false, true, false, false, true];
        let segments = encode_mask(&mask, 100, "speech");
        let rebuilt = mask_from_segments(&segments, 100, mask.len());
        assert_eq!(rebuilt, mask);
    }

    #[test]
    fn rebuilt_mask_clips_past_buffer_end() {
        let segments = vec![SpeechSegment {
            onset_secs: 0.02,
            duration_secs: 0.50,
            label: "speech".into(),
        }];
        let mask = mask_from_segments(&segments, 100, 5);
        assert_eq!(mask, vec![false, false, true, true, true]);
    }

    #[test]
    fn segment_serializes_with_camel_case_fields() {
        let segment = SpeechSegment {
            onset_secs: 1.25,
            duration_secs: 0.75,
            label: "speech".into(),
        };

        let json = serde_json::to_value(&segment).expect("serialize segment");
        let onset = json["onsetSecs"].as_f64().expect("onset as number");
        let duration = json["durationSecs"].as_f64().expect("duration as number");
        assert!((onset - 1.25).abs() < 1e-9);
        assert!((duration - 0.75).abs() < 1e-9);
        assert_eq!(json["label"], "speech");

        let round_trip: SpeechSegment =
            serde_json::from_value(json).expect("deserialize segment");
        assert_eq!(round_trip, segment);
    }
}
