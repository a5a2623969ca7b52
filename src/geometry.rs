// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame pose geometry.

use crate::sequence::KeypointFrame;
use crate::skeleton::{LEFT_SHOULDER, RIGHT_SHOULDER};

/// Axis-aligned bounding box of all keypoints in a frame.
///
/// # Returns
///
/// `[min_x, min_y, max_x, max_y]`, or `None` for a frame with no keypoints or fewer
/// than two coordinates per keypoint.
#[must_use]
pub fn bounding_box(frame: &KeypointFrame) -> Option<[f64; 4]> {
    if frame.num_keypoints() == 0 || frame.dims() < 2 {
        return None;
    }
    let coords = frame.coords();
    let init = [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY];
    Some(coords.rows().into_iter().fold(init, |[x1, y1, x2, y2], p| {
        [x1.min(p[0]), y1.min(p[1]), x2.max(p[0]), y2.max(p[1])]
    }))
}

/// Bounding box in pixel coordinates for a frame of normalized keypoints.
///
/// Each keypoint is scaled by the image size and truncated to an integer pixel
/// before the extent is taken.
///
/// # Arguments
///
/// * `frame` - Keypoints with coordinates normalized to `[0, 1]`.
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn pixel_bounding_box(frame: &KeypointFrame, width: u32, height: u32) -> Option<[i64; 4]> {
    if frame.num_keypoints() == 0 || frame.dims() < 2 {
        return None;
    }
    let (w, h) = (f64::from(width), f64::from(height));
    let init = [i64::MAX, i64::MAX, i64::MIN, i64::MIN];
    Some(frame.coords().rows().into_iter().fold(init, |[x1, y1, x2, y2], p| {
        let (px, py) = ((p[0] * w) as i64, (p[1] * h) as i64);
        [x1.min(px), y1.min(py), x2.max(px), y2.max(py)]
    }))
}

/// Torso yaw in degrees estimated from the depth difference between the shoulders.
///
/// Positive values mean the right shoulder is further from the camera than the left.
///
/// # Returns
///
/// `None` if the frame lacks shoulder landmarks or depth. `0.0` when the shoulders
/// overlap horizontally.
#[must_use]
pub fn shoulder_yaw_degrees(frame: &KeypointFrame) -> Option<f64> {
    let left = frame.keypoint(LEFT_SHOULDER)?;
    let right = frame.keypoint(RIGHT_SHOULDER)?;

    let width = (right.x - left.x).abs();
    if width > 0.0 {
        Some(((right.z - left.z) / width).atan().to_degrees())
    } else {
        Some(0.0)
    }
}
