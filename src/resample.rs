// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Fixed-length temporal resampling of pose sequences.
//!
//! Every keypoint coordinate (and visibility score, if present) is treated as an
//! independent scalar signal over a normalized time axis `[0, 1]`. Each signal is
//! fitted with a [`Pchip`] interpolant and evaluated on an evenly spaced grid of
//! the target length, then the signals are reassembled in their original
//! keypoint/axis order.
//!
//! Sequences with a single frame are replicated rather than interpolated. Empty
//! sequences are rejected.

use ndarray::{Array, Array3, ArrayView, ArrayView3, Axis, RemoveAxis};

use crate::config::ResampleConfig;
use crate::error::{ResampleError, Result};
use crate::pchip::{Pchip, linspace};
use crate::sequence::{KeypointFrame, PoseSequence};

/// A pose sequence normalized to a fixed frame count.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledPoseSequence {
    sequence: PoseSequence,
    source_len: usize,
}

impl ResampledPoseSequence {
    /// Number of frames after resampling.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the resampled sequence has no frames. Never true for a successful resample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of frames in the input sequence.
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source_len
    }

    /// The resampled sequence.
    #[must_use]
    pub const fn sequence(&self) -> &PoseSequence {
        &self.sequence
    }

    /// Consume, returning the resampled sequence.
    #[must_use]
    pub fn into_sequence(self) -> PoseSequence {
        self.sequence
    }

    /// Coordinates with shape `(frames, keypoints, dims)`.
    #[must_use]
    pub fn as_array(&self) -> ArrayView3<'_, f64> {
        self.sequence.as_array()
    }

    /// Coordinates in `(keypoints, frames, dims)` layout.
    #[must_use]
    pub fn to_node_major(&self) -> Array3<f64> {
        self.sequence.to_node_major()
    }
}

/// Outcome of [`SequenceResampler::process`].
#[derive(Debug, Clone, PartialEq)]
pub enum Processed {
    /// The sequence was resampled to the target length.
    Resampled(ResampledPoseSequence),
    /// The sequence already met the target length and was kept as is.
    PassedThrough(PoseSequence),
}

impl Processed {
    /// Whether the sequence was resampled.
    #[must_use]
    pub const fn was_resampled(&self) -> bool {
        matches!(self, Self::Resampled(_))
    }

    /// Consume, returning the output sequence.
    #[must_use]
    pub fn into_sequence(self) -> PoseSequence {
        match self {
            Self::Resampled(r) => r.into_sequence(),
            Self::PassedThrough(s) => s,
        }
    }
}

/// Resamples pose sequences according to a [`ResampleConfig`].
#[derive(Debug, Clone, Default)]
pub struct SequenceResampler {
    config: ResampleConfig,
}

impl SequenceResampler {
    /// Create a resampler.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::InvalidTargetLength`] if the configured target is zero.
    pub fn new(config: ResampleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ResampleConfig {
        &self.config
    }

    /// Resample `sequence` to exactly the configured target length.
    ///
    /// The length policy is not consulted here: the output always has the target
    /// frame count, downsampling longer inputs.
    ///
    /// # Errors
    ///
    /// * [`ResampleError::EmptySequence`] if the sequence has no frames.
    /// * [`ResampleError::VisibilityMismatch`] if the visibility tensor is inconsistent.
    pub fn resample(&self, sequence: &PoseSequence) -> Result<ResampledPoseSequence> {
        if sequence.is_empty() {
            return Err(ResampleError::EmptySequence);
        }
        sequence.validate()?;

        let target = self.config.target_frames;
        let data = resample_signals(sequence.as_array(), target)?;

        let resampled = match sequence.visibility() {
            Some(vis) if self.config.resample_visibility => {
                PoseSequence::with_visibility(data, resample_signals(vis, target)?)?
            }
            _ => PoseSequence::from_array(data),
        };

        Ok(ResampledPoseSequence {
            sequence: resampled,
            source_len: sequence.len(),
        })
    }

    /// Apply the configured length policy to `sequence`.
    ///
    /// # Errors
    ///
    /// Same as [`SequenceResampler::resample`]. Passed-through sequences are still
    /// checked for emptiness and shape consistency.
    pub fn process(&self, sequence: &PoseSequence) -> Result<Processed> {
        if sequence.is_empty() {
            return Err(ResampleError::EmptySequence);
        }
        if self
            .config
            .policy
            .should_resample(sequence.len(), self.config.target_frames)
        {
            return self.resample(sequence).map(Processed::Resampled);
        }

        sequence.validate()?;
        let kept = if self.config.resample_visibility {
            sequence.clone()
        } else {
            sequence.clone().without_visibility()
        };
        Ok(Processed::PassedThrough(kept))
    }
}

/// Resample `sequence` to `target_length` frames.
///
/// # Errors
///
/// * [`ResampleError::InvalidTargetLength`] if `target_length` is zero.
/// * [`ResampleError::EmptySequence`] if the sequence has no frames.
///
/// # Example
///
/// ```rust
/// use ndarray::Array3;
/// use pose_resampler::{PoseSequence, resample};
///
/// let clip = PoseSequence::from_array(Array3::zeros((45, 33, 3)));
/// let fixed = resample(&clip, 60)?;
/// assert_eq!(fixed.as_array().dim(), (60, 33, 3));
/// # Ok::<(), pose_resampler::ResampleError>(())
/// ```
pub fn resample(sequence: &PoseSequence, target_length: usize) -> Result<ResampledPoseSequence> {
    SequenceResampler::new(ResampleConfig::new().with_target_frames(target_length))?
        .resample(sequence)
}

/// Stack `frames` into a sequence and resample it to `target_length` frames.
///
/// # Errors
///
/// * [`ResampleError::InvalidTargetLength`] if `target_length` is zero.
/// * [`ResampleError::EmptySequence`] if `frames` is empty.
/// * [`ResampleError::ShapeMismatch`] if frames disagree on keypoint count or
///   coordinate dimensionality.
pub fn resample_frames(
    frames: &[KeypointFrame],
    target_length: usize,
) -> Result<ResampledPoseSequence> {
    let resampler =
        SequenceResampler::new(ResampleConfig::new().with_target_frames(target_length))?;
    resampler.resample(&PoseSequence::from_frames(frames)?)
}

/// Resample every lane along axis 0 of `data` to `target` samples.
fn resample_signals<D: RemoveAxis>(
    data: ArrayView<'_, f64, D>,
    target: usize,
) -> Result<Array<f64, D>> {
    let len = data.len_of(Axis(0));
    let mut shape = data.raw_dim();
    shape[0] = target;
    let mut out = Array::zeros(shape);

    if len == 1 {
        let only = data.index_axis(Axis(0), 0);
        for mut frame in out.axis_iter_mut(Axis(0)) {
            frame.assign(&only);
        }
        return Ok(out);
    }

    let source_grid = linspace(len);
    let target_grid = linspace(target);
    for (signal, mut resampled) in data
        .lanes(Axis(0))
        .into_iter()
        .zip(out.lanes_mut(Axis(0)))
    {
        let interpolant = Pchip::new(source_grid.view(), signal)?;
        resampled.assign(&interpolant.evaluate_many(target_grid.view()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LengthPolicy;
    use ndarray::{Array2, Array3, s};

    const EPS: f64 = 1e-9;

    fn ramp(frames: usize, keypoints: usize) -> PoseSequence {
        PoseSequence::from_array(Array3::from_shape_fn((frames, keypoints, 3), |(t, n, d)| {
            #[allow(clippy::cast_precision_loss)]
            let v = t as f64 * (n + 1) as f64 - d as f64;
            v
        }))
    }

    #[test]
    fn test_output_length() {
        for (len, target) in [(1, 5), (2, 7), (10, 3), (45, 60), (45, 100), (100, 100)] {
            let out = resample(&ramp(len, 4), target).unwrap();
            assert_eq!(out.len(), target);
            assert_eq!(out.as_array().dim(), (target, 4, 3));
            assert_eq!(out.source_len(), len);
        }
    }

    #[test]
    fn test_single_frame_replicated() {
        let seq = PoseSequence::from_array(Array3::from_shape_fn((1, 2, 3), |(_, n, d)| {
            #[allow(clippy::cast_precision_loss)]
            let v = (n * 3 + d) as f64;
            v
        }));
        let out = resample(&seq, 4).unwrap();
        for frame in out.as_array().axis_iter(Axis(0)) {
            assert_eq!(frame, seq.as_array().index_axis(Axis(0), 0));
        }
    }

    #[test]
    fn test_empty_rejected() {
        let seq = PoseSequence::from_array(Array3::zeros((0, 33, 3)));
        assert!(matches!(resample(&seq, 10), Err(ResampleError::EmptySequence)));
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(matches!(
            resample(&ramp(5, 2), 0),
            Err(ResampleError::InvalidTargetLength(0))
        ));
        assert!(SequenceResampler::new(ResampleConfig::new().with_target_frames(0)).is_err());
    }

    #[test]
    fn test_linear_signal_resampled_exactly() {
        // Linear data has equal secants, so the interpolant is the line itself.
        let out = resample(&ramp(5, 2), 9).unwrap();
        let expected: Vec<f64> = (0..9).map(|i| f64::from(i) * 0.5 * 2.0).collect();
        let got = out.as_array().slice(s![.., 1, 0]).to_vec();
        for (g, e) in got.iter().zip(&expected) {
            assert!((g - e).abs() < EPS, "{g} != {e}");
        }
    }

    #[test]
    fn test_axis_order_preserved() {
        let seq = ramp(6, 3);
        let out = resample(&seq, 6).unwrap();
        assert_eq!(out.as_array(), seq.as_array());
    }

    #[test]
    fn test_resample_frames_shape_mismatch() {
        let frames = vec![
            KeypointFrame::zeros(33, 3),
            KeypointFrame::zeros(33, 3),
            KeypointFrame::zeros(17, 3),
        ];
        assert!(matches!(
            resample_frames(&frames, 10),
            Err(ResampleError::ShapeMismatch { frame: 2, .. })
        ));
        assert!(matches!(
            resample_frames(&[], 10),
            Err(ResampleError::EmptySequence)
        ));
    }

    #[test]
    fn test_visibility_resampled_within_bounds() {
        let vis = Array2::from_shape_fn((5, 2), |(t, n)| if (t + n) % 2 == 0 { 1.0 } else { 0.2 });
        let seq = PoseSequence::with_visibility(Array3::zeros((5, 2, 3)), vis).unwrap();

        let out = resample(&seq, 17).unwrap();
        let resampled = out.sequence().visibility().unwrap();
        assert_eq!(resampled.dim(), (17, 2));
        assert!(resampled.iter().all(|v| (0.2 - EPS..=1.0 + EPS).contains(v)));

        let resampler =
            SequenceResampler::new(ResampleConfig::new().with_target_frames(17).with_visibility(false))
                .unwrap();
        assert!(!resampler.resample(&seq).unwrap().sequence().has_visibility());
    }

    #[test]
    fn test_process_preserve_longer() {
        let config = ResampleConfig::new()
            .with_target_frames(10)
            .with_policy(LengthPolicy::PreserveLonger);
        let resampler = SequenceResampler::new(config).unwrap();

        let long = ramp(15, 2);
        let processed = resampler.process(&long).unwrap();
        assert!(!processed.was_resampled());
        assert_eq!(processed.into_sequence(), long);

        let exact = ramp(10, 2);
        assert!(!resampler.process(&exact).unwrap().was_resampled());

        let short = ramp(4, 2);
        let processed = resampler.process(&short).unwrap();
        assert!(processed.was_resampled());
        assert_eq!(processed.into_sequence().len(), 10);
    }

    #[test]
    fn test_process_always_downsamples() {
        let resampler = SequenceResampler::new(ResampleConfig::new().with_target_frames(10)).unwrap();
        let processed = resampler.process(&ramp(15, 2)).unwrap();
        assert!(processed.was_resampled());
        assert_eq!(processed.into_sequence().len(), 10);
    }
}
