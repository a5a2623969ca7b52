// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Resampling configuration.
//!
//! This module defines the [`ResampleConfig`] struct, which controls the target frame
//! count, how sequences already at or above that length are treated, and how dataset
//! processing is parallelized.

use std::fmt;
use std::str::FromStr;

use crate::error::{ResampleError, Result};

/// Default target frame count.
pub const DEFAULT_TARGET_FRAMES: usize = 100;

/// How dataset processing treats sequences that already have at least the target
/// number of frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthPolicy {
    /// Resample every sequence to exactly the target length.
    #[default]
    Always,
    /// Resample only shorter sequences; longer ones pass through unchanged.
    PreserveLonger,
}

impl LengthPolicy {
    /// Returns the string representation used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::PreserveLonger => "preserve-longer",
        }
    }

    /// Whether a sequence of `len` frames should be resampled to `target` frames.
    #[must_use]
    pub const fn should_resample(&self, len: usize, target: usize) -> bool {
        match self {
            Self::Always => true,
            Self::PreserveLonger => len < target,
        }
    }
}

impl fmt::Display for LengthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LengthPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" | "resample" => Ok(Self::Always),
            "preserve-longer" | "preserve_longer" | "upsample-only" | "pad" => {
                Ok(Self::PreserveLonger)
            }
            _ => Err(PolicyParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid length policy string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid length policy '{0}', expected one of: always, preserve-longer")]
pub struct PolicyParseError(String);

/// Configuration for sequence resampling.
///
/// Uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use pose_resampler::{LengthPolicy, ResampleConfig};
///
/// let config = ResampleConfig::new()
///     .with_target_frames(60)
///     .with_policy(LengthPolicy::PreserveLonger)
///     .with_threads(4);
/// assert_eq!(config.target_frames, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResampleConfig {
    /// Fixed frame count every resampled sequence is normalized to.
    pub target_frames: usize,
    /// Treatment of sequences that already reach the target length.
    pub policy: LengthPolicy,
    /// Whether visibility channels are resampled alongside coordinates.
    /// When `false`, resampled sequences carry no visibility.
    pub resample_visibility: bool,
    /// Worker threads for dataset processing.
    /// Setting this to `0` lets rayon choose.
    pub num_threads: usize,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            target_frames: DEFAULT_TARGET_FRAMES,
            policy: LengthPolicy::Always,
            resample_visibility: true,
            num_threads: 0,
        }
    }
}

impl ResampleConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target frame count.
    ///
    /// # Arguments
    ///
    /// * `frames` - Number of frames in every resampled sequence. Must be at least 1.
    #[must_use]
    pub const fn with_target_frames(mut self, frames: usize) -> Self {
        self.target_frames = frames;
        self
    }

    /// Set the length policy applied during dataset processing.
    #[must_use]
    pub const fn with_policy(mut self, policy: LengthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable resampling of visibility channels.
    #[must_use]
    pub const fn with_visibility(mut self, resample_visibility: bool) -> Self {
        self.resample_visibility = resample_visibility;
        self
    }

    /// Set the number of worker threads for dataset processing.
    ///
    /// # Arguments
    ///
    /// * `threads` - Worker count. Set to `0` for auto-configuration.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::InvalidTargetLength`] if `target_frames` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.target_frames == 0 {
            return Err(ResampleError::InvalidTargetLength(self.target_frames));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ResampleConfig::default();
        assert_eq!(config.target_frames, 100);
        assert_eq!(config.policy, LengthPolicy::Always);
        assert!(config.resample_visibility);
        assert_eq!(config.num_threads, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ResampleConfig::new()
            .with_target_frames(60)
            .with_policy(LengthPolicy::PreserveLonger)
            .with_visibility(false)
            .with_threads(8);

        assert_eq!(config.target_frames, 60);
        assert_eq!(config.policy, LengthPolicy::PreserveLonger);
        assert!(!config.resample_visibility);
        assert_eq!(config.num_threads, 8);
    }

    #[test]
    fn test_zero_target_rejected() {
        let config = ResampleConfig::new().with_target_frames(0);
        assert!(matches!(
            config.validate(),
            Err(ResampleError::InvalidTargetLength(0))
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("always".parse::<LengthPolicy>().unwrap(), LengthPolicy::Always);
        assert_eq!(
            "preserve-longer".parse::<LengthPolicy>().unwrap(),
            LengthPolicy::PreserveLonger
        );
        assert_eq!(
            "Upsample-Only".parse::<LengthPolicy>().unwrap(),
            LengthPolicy::PreserveLonger
        );
        assert!("sometimes".parse::<LengthPolicy>().is_err());
    }

    #[test]
    fn test_policy_parse_error_message() {
        let err = "sometimes".parse::<LengthPolicy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid length policy 'sometimes', expected one of: always, preserve-longer"
        );
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_policy_display_round_trip() {
        for policy in [LengthPolicy::Always, LengthPolicy::PreserveLonger] {
            assert_eq!(policy.to_string().parse::<LengthPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_should_resample() {
        assert!(LengthPolicy::Always.should_resample(150, 100));
        assert!(LengthPolicy::PreserveLonger.should_resample(99, 100));
        assert!(!LengthPolicy::PreserveLonger.should_resample(100, 100));
        assert!(!LengthPolicy::PreserveLonger.should_resample(150, 100));
    }
}
