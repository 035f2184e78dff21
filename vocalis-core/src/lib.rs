//! # vocalis-core
//!
//! Offline speech segmentation engine SDK.
//!
//! ## Architecture
//!
//! ```text
//! Signal → features (energy + centroid per frame)
//!                │
//!        smoothing (reported series)
//!                │
//!        threshold (histogram → peaks → threshold)
//!                │
//!        mask (frame decisions → sample mask)
//!                │
//!        segments (labeled onset/duration runs)
//! ```
//!
//! One `SpeechDetector::detect` call runs the whole batch pass. No audio I/O
//! lives here; callers hand in decoded buffers.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod detector;
pub mod error;
pub mod features;
pub mod mask;
pub mod segments;
pub mod signal;
pub mod smoothing;
pub mod threshold;

// Convenience re-exports for downstream crates
pub use detector::{Detection, DetectorConfig, FeatureAnalysis, SpeechDetector};
pub use error::VocalisError;
pub use segments::SpeechSegment;
pub use signal::Signal;
