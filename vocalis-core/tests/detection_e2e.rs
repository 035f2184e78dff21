use approx::assert_relative_eq;
use vocalis_core::{segments, Signal, SpeechDetector};

/// Deterministic broadband filler: an alternation at the Nyquist rate.
/// Quiet but spectrally bright, so both gates reject it.
fn dither(len: usize, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|i| if i % 2 == 0 { amplitude } else { -amplitude })
        .collect()
}

fn tone(len: usize, freq_hz: f64, sample_rate: u32) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f64 / f64::from(sample_rate);
            (2.0 * std::f64::consts::PI * freq_hz * t).sin() as f32
        })
        .collect()
}

/// 1s filler, 1s of a 100 Hz tone, 1s filler, at 1 kHz.
fn filler_tone_filler(sample_rate: u32) -> Vec<f32> {
    let mut samples = dither(1_000, 0.02);
    samples.extend(tone(1_000, 100.0, sample_rate));
    samples.extend(dither(1_000, 0.02));
    samples
}

#[test]
fn tone_between_filler_yields_one_widened_segment() {
    let sample_rate = 1_000;
    let detector = SpeechDetector::default();
    let detection = detector
        .detect(&Signal::new(filler_tone_filler(sample_rate), sample_rate))
        .expect("detection should run");

    assert_eq!(detection.frame_len, 25);
    // The tone occupies frames 40..=79; the filler is quieter and brighter.
    assert_eq!(detection.frame_mask.iter().filter(|&&s| s).count(), 40);
    assert!(detection.energy.threshold > 0.0);
    assert!(detection.centroid.threshold > 0.0);

    let segments = detection.segments("speech");
    assert_eq!(segments.len(), 1, "expected one run, got {segments:?}");
    let seg = &segments[0];
    assert_eq!(seg.label, "speech");
    // The tone spans 1.0s..2.0s and each edge grows by 5 frames (125 ms).
    assert_relative_eq!(seg.onset_secs, 0.875, epsilon = 1e-9);
    assert_relative_eq!(seg.duration_secs, 1.249, epsilon = 1e-9);
    assert_relative_eq!(detection.speech_ratio(), 1_250.0 / 3_000.0, epsilon = 1e-12);
}

#[test]
fn segments_round_trip_back_to_the_sample_mask() {
    let sample_rate = 1_000;
    let detector = SpeechDetector::default();
    let detection = detector
        .detect(&Signal::new(filler_tone_filler(sample_rate), sample_rate))
        .expect("detection should run");

    let rebuilt = segments::mask_from_segments(
        &detection.segments("speech"),
        sample_rate,
        detection.sample_mask.len(),
    );
    assert_eq!(rebuilt, detection.sample_mask);
}

#[test]
fn uniform_filler_clip_stays_unlabeled() {
    let detector = SpeechDetector::default();
    let detection = detector
        .detect(&Signal::new(dither(3_000, 0.02), 1_000))
        .expect("detection should run");

    assert_eq!(detection.speech_samples(), 0);
    assert!(detection.segments("speech").is_empty());
}

#[test]
fn detection_is_deterministic_across_runs() {
    let sample_rate = 1_000;
    let signal = Signal::new(filler_tone_filler(sample_rate), sample_rate);
    let detector = SpeechDetector::default();

    let first = detector.detect(&signal).expect("first pass");
    let second = detector.detect(&signal).expect("second pass");
    assert_eq!(first.sample_mask, second.sample_mask);
    assert_eq!(first.energy.threshold, second.energy.threshold);
    assert_eq!(first.centroid.threshold, second.centroid.threshold);
}
