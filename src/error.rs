// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the resampling library.

use thiserror::Error;

/// Result type alias for resampling operations.
pub type Result<T> = std::result::Result<T, ResampleError>;

/// Main error type for the resampling library.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// Frames within one sequence disagree on keypoint count or coordinate dimensionality.
    #[error("Shape mismatch: frame {frame} has shape ({found_keypoints}, {found_dims}), expected ({expected_keypoints}, {expected_dims})")]
    ShapeMismatch {
        /// Index of the offending frame.
        frame: usize,
        /// Keypoint count of the first frame.
        expected_keypoints: usize,
        /// Coordinate dimensionality of the first frame.
        expected_dims: usize,
        /// Keypoint count of the offending frame.
        found_keypoints: usize,
        /// Coordinate dimensionality of the offending frame.
        found_dims: usize,
    },
    /// Visibility scores do not line up with the coordinate tensor.
    #[error("Visibility shape mismatch: got ({found_frames}, {found_keypoints}), expected ({expected_frames}, {expected_keypoints}) frames x keypoints")]
    VisibilityMismatch {
        /// Frame count of the coordinates.
        expected_frames: usize,
        /// Keypoint count of the coordinates.
        expected_keypoints: usize,
        /// Frame count of the visibility scores.
        found_frames: usize,
        /// Keypoint count of the visibility scores.
        found_keypoints: usize,
    },
    /// Requested target frame count is not positive.
    #[error("Invalid target length: {0} (must be at least 1)")]
    InvalidTargetLength(usize),
    /// Sequence has no frames.
    #[error("Empty sequence: at least one frame is required")]
    EmptySequence,
    /// Interpolator construction failed.
    #[error("Interpolation error: {0}")]
    Interpolation(String),
    /// Label is not present in the label map.
    #[error("Unknown label: {0}")]
    UnknownLabel(String),
    /// Invalid configuration provided.
    #[error("Config error: {0}")]
    Config(String),
    /// Wrapped `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Dataset (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ResampleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
