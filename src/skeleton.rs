// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! BlazePose landmark layout.

use ndarray::Array2;

/// Number of landmarks produced by BlazePose.
pub const NUM_LANDMARKS: usize = 33;

/// Landmark names in BlazePose index order.
pub const LANDMARK_NAMES: [&str; NUM_LANDMARKS] = [
    "nose",
    "left_eye_inner",
    "left_eye",
    "left_eye_outer",
    "right_eye_inner",
    "right_eye",
    "right_eye_outer",
    "left_ear",
    "right_ear",
    "mouth_left",
    "mouth_right",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_pinky",
    "right_pinky",
    "left_index",
    "right_index",
    "left_thumb",
    "right_thumb",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
    "left_heel",
    "right_heel",
    "left_foot_index",
    "right_foot_index",
];

/// Index of the left shoulder landmark.
pub const LEFT_SHOULDER: usize = 11;
/// Index of the right shoulder landmark.
pub const RIGHT_SHOULDER: usize = 12;
/// Index of the left hip landmark.
pub const LEFT_HIP: usize = 23;
/// Index of the right hip landmark.
pub const RIGHT_HIP: usize = 24;

/// BlazePose skeleton structure (pairs of landmark indices)
/// Defines which landmarks connect to form the pose skeleton
pub const SKELETON: [[usize; 2]; 35] = [
    [0, 1], // nose to left eye inner
    [1, 2],
    [2, 3],
    [3, 7], // left eye outer to left ear
    [0, 4], // nose to right eye inner
    [4, 5],
    [5, 6],
    [6, 8], // right eye outer to right ear
    [9, 10], // mouth
    [11, 12], // shoulders
    [11, 13], // left arm
    [13, 15],
    [15, 17],
    [15, 19],
    [15, 21],
    [17, 19],
    [12, 14], // right arm
    [14, 16],
    [16, 18],
    [16, 20],
    [16, 22],
    [18, 20],
    [11, 23], // torso
    [12, 24],
    [23, 24],
    [23, 25], // left leg
    [24, 26], // right leg
    [25, 27],
    [26, 28],
    [27, 29],
    [28, 30],
    [29, 31],
    [30, 32],
    [27, 31],
    [28, 32],
];

/// Look up a landmark index by name.
#[must_use]
pub fn landmark_index(name: &str) -> Option<usize> {
    LANDMARK_NAMES.iter().position(|&n| n == name)
}

/// Symmetric skeleton adjacency matrix for graph convolution.
///
/// # Arguments
///
/// * `self_loops` - Whether each landmark is connected to itself.
#[must_use]
pub fn adjacency_matrix(self_loops: bool) -> Array2<f32> {
    let mut adjacency = if self_loops {
        Array2::eye(NUM_LANDMARKS)
    } else {
        Array2::zeros((NUM_LANDMARKS, NUM_LANDMARKS))
    };
    for [a, b] in SKELETON {
        adjacency[[a, b]] = 1.0;
        adjacency[[b, a]] = 1.0;
    }
    adjacency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_lookup() {
        assert_eq!(landmark_index("left_shoulder"), Some(LEFT_SHOULDER));
        assert_eq!(landmark_index("right_shoulder"), Some(RIGHT_SHOULDER));
        assert_eq!(landmark_index("left_hip"), Some(LEFT_HIP));
        assert_eq!(landmark_index("right_hip"), Some(RIGHT_HIP));
        assert_eq!(landmark_index("tail"), None);
    }

    #[test]
    fn test_skeleton_indices_in_range() {
        assert!(SKELETON.iter().flatten().all(|&i| i < NUM_LANDMARKS));
    }

    #[test]
    fn test_adjacency_symmetric() {
        let a = adjacency_matrix(true);
        assert_eq!(a.dim(), (NUM_LANDMARKS, NUM_LANDMARKS));
        assert_eq!(a, a.t());
        assert!((a[[0, 0]] - 1.0).abs() < f32::EPSILON);
        assert!((a[[11, 12]] - 1.0).abs() < f32::EPSILON);
        assert!(a[[0, 32]].abs() < f32::EPSILON);

        let edges = adjacency_matrix(false).sum();
        #[allow(clippy::cast_precision_loss)]
        let expected = (2 * SKELETON.len()) as f32;
        assert!((edges - expected).abs() < f32::EPSILON);
    }
}
