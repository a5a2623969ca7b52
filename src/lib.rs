// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Pose Sequence Resampler
//!
//! Temporal normalization for pose-keypoint motion clips. Sequences of BlazePose
//! landmarks of arbitrary length are resampled to a fixed frame count with
//! shape-preserving piecewise cubic Hermite interpolation (PCHIP), so they can be
//! batched into fixed-size tensors for an action classifier.
//!
//! ## Features
//!
//! - **Monotone interpolation** - PCHIP never overshoots the input samples, so joints
//!   do not wobble past where they actually were
//! - **Exact endpoints** - the first and last frames are reproduced exactly
//! - **Parallel batches** - whole datasets are resampled on a rayon pool
//! - **JSON datasets** - labelled sequences load and save with serde
//! - **Capture helpers** - per-frame visibility filtering and segment recording
//!
//! ## Quick Start (Library)
//!
//! ```
//! use ndarray::Array3;
//! use pose_resampler::{PoseSequence, resample};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 45 frames of 33 landmarks in 3D
//! let clip = PoseSequence::from_array(Array3::zeros((45, 33, 3)));
//!
//! let fixed = resample(&clip, 100)?;
//! assert_eq!(fixed.as_array().dim(), (100, 33, 3));
//! # Ok(())
//! # }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Resample every clip of a dataset to 60 frames
//! pose-resampler resample --input pose_dataset.json --output pose_dataset_60.json --frames 60
//!
//! # Keep clips that are already long enough untouched
//! pose-resampler resample -i clips.json -o clips_fixed.json --policy preserve-longer
//!
//! # Print dataset statistics
//! pose-resampler inspect --input pose_dataset_60.json
//! ```
//!
//! **Resample Options:**
//!
//! | Option | Short | Description | Default |
//! |--------|-------|-------------|---------|
//! | `--input` | `-i` | Dataset JSON to read | required |
//! | `--output` | `-o` | Dataset JSON to write | required |
//! | `--frames` | `-f` | Target frame count | `100` |
//! | `--policy` | | `always` or `preserve-longer` | `always` |
//! | `--threads` | | Worker threads, `0` = automatic | `0` |
//! | `--drop-visibility` | | Strip visibility scores | `false` |

// Modules
pub mod batch;
pub mod capture;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod pchip;
pub mod resample;
pub mod sequence;
pub mod skeleton;
pub mod utils;

// Re-export main types for convenience
pub use batch::{BatchReport, SequenceFailure, resample_dataset};
pub use capture::{FilterState, KeypointFilter, SegmentRecorder};
pub use config::{LengthPolicy, ResampleConfig};
pub use dataset::{Dataset, DatasetSummary, Label, LabelMap, LabeledSequence, TrainingExample};
pub use error::{ResampleError, Result};
pub use pchip::Pchip;
pub use resample::{
    Processed, ResampledPoseSequence, SequenceResampler, resample, resample_frames,
};
pub use sequence::{Keypoint, KeypointFrame, PoseSequence};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
