// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Live capture helpers.
//!
//! [`KeypointFilter`] decides whether a per-frame pose detection is reliable enough to
//! record, filling occluded landmarks from the last accepted frame. The filter owns no
//! state: the caller threads a [`FilterState`] through successive calls, so several
//! independent streams can share one filter. [`SegmentRecorder`] collects accepted
//! frames until the segment is labelled and turned into a [`LabeledSequence`].

use crate::dataset::{Label, LabeledSequence};
use crate::error::Result;
use crate::sequence::{Keypoint, KeypointFrame, PoseSequence};
use crate::skeleton::NUM_LANDMARKS;

/// Default visibility above which a landmark counts as observed.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Default number of observed landmarks required to accept a frame.
pub const DEFAULT_MIN_VISIBLE: usize = 20;

/// Landmarks carried over between accepted frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    previous: Option<Vec<Keypoint>>,
}

impl FilterState {
    /// A state with no accepted frame yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { previous: None }
    }

    /// Landmarks of the last accepted frame.
    #[must_use]
    pub fn previous(&self) -> Option<&[Keypoint]> {
        self.previous.as_deref()
    }
}

/// Per-frame acceptance filter for pose detections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeypointFilter {
    /// Visibility above which a landmark counts as observed.
    pub visibility_threshold: f64,
    /// Observed landmarks required to accept a frame.
    pub min_visible: usize,
    /// Landmarks per frame.
    pub keypoint_count: usize,
}

impl Default for KeypointFilter {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            min_visible: DEFAULT_MIN_VISIBLE,
            keypoint_count: NUM_LANDMARKS,
        }
    }
}

impl KeypointFilter {
    /// Create a filter with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visibility threshold.
    #[must_use]
    pub const fn with_visibility_threshold(mut self, threshold: f64) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Set the minimum observed landmark count.
    #[must_use]
    pub const fn with_min_visible(mut self, min_visible: usize) -> Self {
        self.min_visible = min_visible;
        self
    }

    /// Filter one detection.
    ///
    /// Landmarks missing from `detection` keep their value from the last accepted frame
    /// (zeros before the first one). The frame is accepted when more than
    /// `visibility_threshold` is reported for at least `min_visible` landmarks; a
    /// rejected frame leaves the state untouched.
    ///
    /// # Arguments
    ///
    /// * `state` - State returned by the previous call.
    /// * `detection` - Detected landmarks, or `None` when no person was found.
    ///
    /// # Returns
    ///
    /// The next state and the accepted frame, if any.
    #[must_use]
    pub fn apply(
        &self,
        state: FilterState,
        detection: Option<&[Keypoint]>,
    ) -> (FilterState, Option<KeypointFrame>) {
        let Some(detection) = detection else {
            return (state, None);
        };

        let visible = detection
            .iter()
            .take(self.keypoint_count)
            .filter(|k| k.visibility.is_some_and(|v| v > self.visibility_threshold))
            .count();
        if visible < self.min_visible {
            return (state, None);
        }

        let mut keypoints = match state.previous {
            Some(prev) if prev.len() == self.keypoint_count => prev,
            _ => vec![Keypoint::new(0.0, 0.0, 0.0).with_visibility(0.0); self.keypoint_count],
        };
        for (slot, kp) in keypoints.iter_mut().zip(detection) {
            *slot = *kp;
        }

        let frame = KeypointFrame::from_keypoints(&keypoints);
        (
            FilterState {
                previous: Some(keypoints),
            },
            Some(frame),
        )
    }
}

/// Accumulates accepted frames of one gesture segment.
#[derive(Debug, Clone, Default)]
pub struct SegmentRecorder {
    frames: Vec<KeypointFrame>,
}

impl SegmentRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Append an accepted frame.
    pub fn push(&mut self, frame: KeypointFrame) {
        self.frames.push(frame);
    }

    /// Number of frames recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frame has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drop the recorded frames without emitting a sequence.
    pub fn discard(&mut self) {
        self.frames.clear();
    }

    /// Close the current segment under `label` and start a new one.
    ///
    /// # Returns
    ///
    /// `None` if nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ResampleError::ShapeMismatch`] if the recorded frames disagree
    /// in shape. The frames are dropped either way.
    pub fn finish(&mut self, label: impl Into<Label>) -> Result<Option<LabeledSequence>> {
        if self.frames.is_empty() {
            return Ok(None);
        }
        let frames = std::mem::take(&mut self.frames);
        let sequence = PoseSequence::from_frames(&frames)?;
        Ok(Some(LabeledSequence::new(sequence, label)))
    }
}
