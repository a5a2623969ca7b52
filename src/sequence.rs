// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose keypoint data model.
//!
//! A [`PoseSequence`] stores one motion clip as a `(frames, keypoints, dims)` tensor,
//! optionally alongside a `(frames, keypoints)` visibility tensor. Individual frames
//! are exposed as [`KeypointFrame`]s, and single landmarks as [`Keypoint`]s.

use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayView3, Axis, s};
use serde::{Deserialize, Serialize};

use crate::error::{ResampleError, Result};

/// A single tracked landmark with an optional visibility score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Depth coordinate.
    pub z: f64,
    /// Visibility / confidence in `[0, 1]`, if the detector reports one.
    pub visibility: Option<f64>,
}

impl Keypoint {
    /// Create a keypoint without a visibility score.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    /// Attach a visibility score.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Coordinates as `[x, y, z]`.
    #[must_use]
    pub const fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// All keypoints observed in one video frame.
#[derive(Debug, Clone, PartialEq)]
pub struct KeypointFrame {
    coords: Array2<f64>,
    visibility: Option<Array1<f64>>,
}

impl KeypointFrame {
    /// Create a frame from an `(keypoints, dims)` coordinate array.
    #[must_use]
    pub const fn new(coords: Array2<f64>) -> Self {
        Self {
            coords,
            visibility: None,
        }
    }

    /// Create a frame with a per-keypoint visibility vector.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::VisibilityMismatch`] if the visibility length differs
    /// from the keypoint count.
    pub fn with_visibility(coords: Array2<f64>, visibility: Array1<f64>) -> Result<Self> {
        if visibility.len() != coords.nrows() {
            return Err(ResampleError::VisibilityMismatch {
                expected_frames: 1,
                expected_keypoints: coords.nrows(),
                found_frames: 1,
                found_keypoints: visibility.len(),
            });
        }
        Ok(Self {
            coords,
            visibility: Some(visibility),
        })
    }

    /// A frame of `keypoints` zeroed landmarks with `dims` coordinates each.
    #[must_use]
    pub fn zeros(keypoints: usize, dims: usize) -> Self {
        Self::new(Array2::zeros((keypoints, dims)))
    }

    /// Build a 3D frame from keypoints.
    ///
    /// Visibility is kept only if every keypoint carries one.
    #[must_use]
    pub fn from_keypoints(keypoints: &[Keypoint]) -> Self {
        let coords = Array2::from_shape_fn((keypoints.len(), 3), |(i, c)| keypoints[i].coords()[c]);
        let visibility = keypoints
            .iter()
            .map(|k| k.visibility)
            .collect::<Option<Vec<f64>>>()
            .map(Array1::from);
        Self { coords, visibility }
    }

    /// Number of keypoints in the frame.
    #[must_use]
    pub fn num_keypoints(&self) -> usize {
        self.coords.nrows()
    }

    /// Coordinate dimensionality of each keypoint.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.coords.ncols()
    }

    /// Coordinates with shape `(keypoints, dims)`.
    #[must_use]
    pub fn coords(&self) -> ArrayView2<'_, f64> {
        self.coords.view()
    }

    /// Mutable coordinates with shape `(keypoints, dims)`.
    pub fn coords_mut(&mut self) -> ndarray::ArrayViewMut2<'_, f64> {
        self.coords.view_mut()
    }

    /// Per-keypoint visibility, if present.
    #[must_use]
    pub fn visibility(&self) -> Option<ArrayView1<'_, f64>> {
        self.visibility.as_ref().map(Array1::view)
    }

    /// Landmark `index` as a [`Keypoint`].
    ///
    /// Returns `None` if the index is out of range or the frame has fewer than three
    /// coordinates per keypoint.
    #[must_use]
    pub fn keypoint(&self, index: usize) -> Option<Keypoint> {
        if index >= self.num_keypoints() || self.dims() < 3 {
            return None;
        }
        let row = self.coords.row(index);
        Some(Keypoint {
            x: row[0],
            y: row[1],
            z: row[2],
            visibility: self.visibility.as_ref().map(|v| v[index]),
        })
    }
}

/// An ordered sequence of keypoint frames forming one motion clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSequence {
    /// Coordinates with shape `(frames, keypoints, dims)`.
    data: Array3<f64>,
    /// Visibility with shape `(frames, keypoints)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    visibility: Option<Array2<f64>>,
}

impl PoseSequence {
    /// Wrap a `(frames, keypoints, dims)` tensor.
    #[must_use]
    pub const fn from_array(data: Array3<f64>) -> Self {
        Self {
            data,
            visibility: None,
        }
    }

    /// Wrap a coordinate tensor and a matching `(frames, keypoints)` visibility tensor.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::VisibilityMismatch`] if the visibility shape does not match.
    pub fn with_visibility(data: Array3<f64>, visibility: Array2<f64>) -> Result<Self> {
        let sequence = Self {
            data,
            visibility: Some(visibility),
        };
        sequence.validate()?;
        Ok(sequence)
    }

    /// Stack frames into a sequence.
    ///
    /// Visibility is kept only if every frame carries one.
    ///
    /// # Errors
    ///
    /// * [`ResampleError::EmptySequence`] if `frames` is empty.
    /// * [`ResampleError::ShapeMismatch`] if any frame's keypoint count or coordinate
    ///   dimensionality differs from the first frame.
    pub fn from_frames(frames: &[KeypointFrame]) -> Result<Self> {
        let first = frames.first().ok_or(ResampleError::EmptySequence)?;
        let (keypoints, dims) = (first.num_keypoints(), first.dims());

        for (i, frame) in frames.iter().enumerate().skip(1) {
            if frame.num_keypoints() != keypoints || frame.dims() != dims {
                return Err(ResampleError::ShapeMismatch {
                    frame: i,
                    expected_keypoints: keypoints,
                    expected_dims: dims,
                    found_keypoints: frame.num_keypoints(),
                    found_dims: frame.dims(),
                });
            }
        }

        let mut data = Array3::zeros((frames.len(), keypoints, dims));
        for (mut slot, frame) in data.axis_iter_mut(Axis(0)).zip(frames) {
            slot.assign(&frame.coords);
        }

        let visibility = if frames.iter().all(|f| f.visibility.is_some()) {
            let mut vis = Array2::zeros((frames.len(), keypoints));
            for (mut row, frame) in vis.axis_iter_mut(Axis(0)).zip(frames) {
                if let Some(v) = &frame.visibility {
                    row.assign(v);
                }
            }
            Some(vis)
        } else {
            None
        };

        Ok(Self { data, visibility })
    }

    /// Check that the visibility tensor, if any, matches the coordinate tensor.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::VisibilityMismatch`] with both shapes.
    pub fn validate(&self) -> Result<()> {
        let (frames, keypoints, _) = self.shape();
        if let Some(vis) = &self.visibility {
            let (vis_frames, vis_keypoints) = vis.dim();
            if vis_frames != frames || vis_keypoints != keypoints {
                return Err(ResampleError::VisibilityMismatch {
                    expected_frames: frames,
                    expected_keypoints: keypoints,
                    found_frames: vis_frames,
                    found_keypoints: vis_keypoints,
                });
            }
        }
        Ok(())
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Whether the sequence has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of keypoints per frame.
    #[must_use]
    pub fn num_keypoints(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Coordinate dimensionality per keypoint.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Shape as `(frames, keypoints, dims)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Coordinate tensor with shape `(frames, keypoints, dims)`.
    #[must_use]
    pub fn as_array(&self) -> ArrayView3<'_, f64> {
        self.data.view()
    }

    /// Visibility tensor with shape `(frames, keypoints)`, if present.
    #[must_use]
    pub fn visibility(&self) -> Option<ArrayView2<'_, f64>> {
        self.visibility.as_ref().map(Array2::view)
    }

    /// Whether per-keypoint visibility is stored.
    #[must_use]
    pub const fn has_visibility(&self) -> bool {
        self.visibility.is_some()
    }

    /// Drop the visibility tensor.
    #[must_use]
    pub fn without_visibility(mut self) -> Self {
        self.visibility = None;
        self
    }

    /// Consume the sequence, returning the coordinate tensor.
    #[must_use]
    pub fn into_array(self) -> Array3<f64> {
        self.data
    }

    /// Frame `index`, copied out of the tensor.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<KeypointFrame> {
        if index >= self.len() {
            return None;
        }
        Some(KeypointFrame {
            coords: self.data.index_axis(Axis(0), index).to_owned(),
            visibility: self
                .visibility
                .as_ref()
                .map(|v| v.row(index).to_owned()),
        })
    }

    /// Iterate over all frames in order.
    pub fn frames(&self) -> impl Iterator<Item = KeypointFrame> + '_ {
        (0..self.len()).filter_map(|i| self.frame(i))
    }

    /// Values of one keypoint coordinate across all frames.
    ///
    /// # Panics
    ///
    /// Panics if `keypoint` or `dim` is out of range.
    #[must_use]
    pub fn signal(&self, keypoint: usize, dim: usize) -> ArrayView1<'_, f64> {
        self.data.slice(s![.., keypoint, dim])
    }

    /// Coordinates in node-major `(keypoints, frames, dims)` layout, the input layout of
    /// spatio-temporal graph convolution.
    #[must_use]
    pub fn to_node_major(&self) -> Array3<f64> {
        self.data
            .view()
            .permuted_axes([1, 0, 2])
            .as_standard_layout()
            .into_owned()
    }
}
