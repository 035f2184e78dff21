fn main() {
    if let Err(e) = run() {
        eprintln!("annotate failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    use serde::Serialize;
    use std::path::{Path, PathBuf};
    use vocalis_core::{DetectorConfig, Signal, SpeechDetector, SpeechSegment};

    #[derive(Debug)]
    struct Args {
        input: PathBuf,
        label: String,
        start_secs: Option<f64>,
        end_secs: Option<f64>,
        window_secs: Option<f64>,
        output: Option<PathBuf>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Report {
        file: String,
        sample_rate: u32,
        duration_secs: f64,
        frame_len: usize,
        energy_threshold: f32,
        centroid_threshold: f32,
        segment_count: usize,
        speech_secs: f64,
        speech_ratio: f64,
        segments: Vec<SpeechSegment>,
    }

    fn parse_args() -> Result<Args, String> {
        let mut input: Option<PathBuf> = None;
        let mut label = String::from("speech");
        let mut start_secs: Option<f64> = None;
        let mut end_secs: Option<f64> = None;
        let mut window_secs: Option<f64> = None;
        let mut output: Option<PathBuf> = None;

        fn parse_secs(flag: &str, value: Option<String>) -> Result<f64, String> {
            let Some(v) = value else {
                return Err(format!("missing value for {flag}"));
            };
            v.parse::<f64>()
                .map_err(|_| format!("invalid value for {flag}"))
                .map(|secs| secs.max(0.0))
        }

        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--label" => {
                    let Some(v) = it.next() else {
                        return Err("missing value for --label".into());
                    };
                    label = v;
                }
                "--start-secs" => {
                    start_secs = Some(parse_secs("--start-secs", it.next())?);
                }
                "--end-secs" => {
                    end_secs = Some(parse_secs("--end-secs", it.next())?);
                }
                "--window-secs" => {
                    let secs = parse_secs("--window-secs", it.next())?;
                    if secs == 0.0 {
                        return Err("--window-secs must be positive".into());
                    }
                    window_secs = Some(secs);
                }
                "--output" => {
                    let Some(v) = it.next() else {
                        return Err("missing value for --output".into());
                    };
                    output = Some(PathBuf::from(v));
                }
                "--help" | "-h" => {
                    println!(
                        "Usage: cargo run -p vocalis-core --bin annotate -- <input.wav> \\
  [--label <name>] [--start-secs <s>] [--end-secs <s>] \\
  [--window-secs <s>] [--output <file.json>]"
                    );
                    std::process::exit(0);
                }
                other => {
                    if other.starts_with('-') {
                        return Err(format!("unknown argument: {other}"));
                    }
                    if input.is_some() {
                        return Err(format!("unexpected extra argument: {other}"));
                    }
                    input = Some(PathBuf::from(other));
                }
            }
        }

        let input =
            input.ok_or_else(|| "missing input file (pass a path to a .wav recording)".to_string())?;
        Ok(Args {
            input,
            label,
            start_secs,
            end_secs,
            window_secs,
            output,
        })
    }

    fn read_wav_mono(path: &Path) -> Result<(Vec<f32>, u32), String> {
        let mut reader =
            hound::WavReader::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
        let spec = reader.spec();
        let channels = usize::from(spec.channels.max(1));

        let raw: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| e.to_string())?,
            hound::SampleFormat::Int => {
                let full_scale = ((1_i64 << (spec.bits_per_sample - 1)) - 1) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| e.to_string())?
            }
        };

        if channels == 1 {
            return Ok((raw, spec.sample_rate));
        }
        let mono = raw
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();
        Ok((mono, spec.sample_rate))
    }

    fn crop(samples: Vec<f32>, sample_rate: u32, start: Option<f64>, end: Option<f64>) -> Vec<f32> {
        let to_index = |secs: f64| (secs * f64::from(sample_rate)).round() as usize;
        let lo = start.map_or(0, to_index).min(samples.len());
        let hi = end.map_or(samples.len(), to_index).min(samples.len());
        if lo >= hi {
            return Vec::new();
        }
        samples[lo..hi].to_vec()
    }

    let args = parse_args()?;
    let (samples, sample_rate) = read_wav_mono(&args.input)?;
    let total_secs = samples.len() as f64 / f64::from(sample_rate);
    let samples = crop(samples, sample_rate, args.start_secs, args.end_secs);
    let signal = Signal::new(samples, sample_rate);
    println!(
        "Analyzing {} ({:.2}s of {:.2}s at {} Hz)",
        args.input.display(),
        signal.duration_secs(),
        total_secs,
        sample_rate
    );

    let mut config = DetectorConfig::default();
    if let Some(window_secs) = args.window_secs {
        config.window_secs = window_secs;
    }
    let detector = SpeechDetector::new(config);
    let detection = detector.detect(&signal).map_err(|e| e.to_string())?;

    let segments = detection.segments(&args.label);
    let speech_secs = detection.speech_samples() as f64 / f64::from(sample_rate);
    println!(
        "Found {} segment(s), {:.2}s marked '{}' ({:.1}% of the clip)",
        segments.len(),
        speech_secs,
        args.label,
        detection.speech_ratio() * 100.0
    );

    let report = Report {
        file: args.input.display().to_string(),
        sample_rate,
        duration_secs: signal.duration_secs(),
        frame_len: detection.frame_len,
        energy_threshold: detection.energy.threshold,
        centroid_threshold: detection.centroid.threshold,
        segment_count: segments.len(),
        speech_secs,
        speech_ratio: detection.speech_ratio(),
        segments,
    };

    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    if let Some(out) = args.output {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        std::fs::write(&out, json).map_err(|e| e.to_string())?;
        println!("Wrote annotation report: {}", out.display());
    } else {
        println!("{json}");
    }

    Ok(())
}
