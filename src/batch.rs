// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Batch processing module.
//!
//! This module provides [`resample_dataset`], which normalizes every sequence of a
//! [`Dataset`] in parallel. Sequences are independent, so each one is processed on
//! its own rayon task with no shared state. A sequence that fails is reported and
//! skipped; it never aborts the rest of the batch.

use rayon::prelude::*;

use crate::config::ResampleConfig;
use crate::dataset::{Dataset, Label, LabeledSequence};
use crate::error::{ResampleError, Result};
use crate::resample::{Processed, SequenceResampler};
use crate::warn;

/// A sequence that could not be processed.
#[derive(Debug)]
pub struct SequenceFailure {
    /// Position of the record in the input dataset.
    pub index: usize,
    /// Label of the record.
    pub label: Label,
    /// Why it failed.
    pub error: ResampleError,
}

/// Result of processing a whole dataset.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully processed records, in input order.
    pub dataset: Dataset,
    /// Records that were skipped.
    pub failures: Vec<SequenceFailure>,
    /// Number of records resampled to the target length.
    pub resampled: usize,
    /// Number of records kept unchanged by the length policy.
    pub passed_through: usize,
}

impl BatchReport {
    /// Whether every record was processed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of input records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.dataset.len() + self.failures.len()
    }
}

/// Process every record of `dataset` according to `config`.
///
/// Records are processed in parallel. When `config.num_threads` is non-zero a
/// dedicated pool of that many workers is used, otherwise rayon's global pool.
///
/// # Errors
///
/// Returns [`ResampleError::InvalidTargetLength`] for an invalid configuration and
/// [`ResampleError::Config`] if the worker pool cannot be built. Per-sequence errors
/// are collected in [`BatchReport::failures`] instead.
///
/// # Example
///
/// ```rust
/// use ndarray::Array3;
/// use pose_resampler::{Dataset, PoseSequence, ResampleConfig, batch::resample_dataset};
///
/// let mut dataset = Dataset::new();
/// dataset.push(PoseSequence::from_array(Array3::zeros((12, 33, 3))), "A");
/// dataset.push(PoseSequence::from_array(Array3::zeros((0, 33, 3))), "B");
///
/// let report = resample_dataset(&dataset, &ResampleConfig::new().with_target_frames(60))?;
/// assert_eq!(report.dataset.len(), 1);
/// assert_eq!(report.failures[0].index, 1);
/// # Ok::<(), pose_resampler::ResampleError>(())
/// ```
pub fn resample_dataset(dataset: &Dataset, config: &ResampleConfig) -> Result<BatchReport> {
    let resampler = SequenceResampler::new(config.clone())?;

    let outcomes = if config.num_threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .build()
            .map_err(|e| ResampleError::Config(format!("Failed to build worker pool: {e}")))?;
        pool.install(|| process_all(&resampler, dataset))
    } else {
        process_all(&resampler, dataset)
    };

    let mut report = BatchReport::default();
    for (index, (record, outcome)) in dataset.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(processed) => {
                if processed.was_resampled() {
                    report.resampled += 1;
                } else {
                    report.passed_through += 1;
                }
                report
                    .dataset
                    .push(processed.into_sequence(), record.label.clone());
            }
            Err(error) => {
                warn!(
                    "Skipping sequence {index} (label '{}', {} frames): {error}",
                    record.label,
                    record.sequence.len()
                );
                report.failures.push(SequenceFailure {
                    index,
                    label: record.label.clone(),
                    error,
                });
            }
        }
    }
    Ok(report)
}

fn process_all(resampler: &SequenceResampler, dataset: &Dataset) -> Vec<Result<Processed>> {
    dataset
        .records()
        .par_iter()
        .map(|record: &LabeledSequence| resampler.process(&record.sequence))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LengthPolicy;
    use crate::sequence::PoseSequence;
    use ndarray::Array3;

    fn clip(frames: usize) -> PoseSequence {
        PoseSequence::from_array(Array3::from_elem((frames, 5, 3), 0.5))
    }

    fn mixed() -> Dataset {
        let mut ds = Dataset::new();
        ds.push(clip(10), "A");
        ds.push(clip(0), "B");
        ds.push(clip(150), "C");
        ds.push(clip(1), "D");
        ds
    }

    #[test]
    fn test_failures_are_skipped_in_order() {
        let report = resample_dataset(&mixed(), &ResampleConfig::new().with_target_frames(100)).unwrap();

        assert_eq!(report.total(), 4);
        assert!(!report.is_clean());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].label.as_str(), "B");
        assert!(matches!(report.failures[0].error, ResampleError::EmptySequence));

        let labels: Vec<&str> = report.dataset.labels().map(Label::as_str).collect();
        assert_eq!(labels, ["A", "C", "D"]);
        assert!(report.dataset.iter().all(|r| r.sequence.len() == 100));
        assert_eq!(report.resampled, 3);
        assert_eq!(report.passed_through, 0);
    }

    #[test]
    fn test_preserve_longer_policy() {
        let config = ResampleConfig::new()
            .with_target_frames(100)
            .with_policy(LengthPolicy::PreserveLonger);
        let report = resample_dataset(&mixed(), &config).unwrap();

        let lengths: Vec<usize> = report.dataset.iter().map(|r| r.sequence.len()).collect();
        assert_eq!(lengths, [100, 150, 100]);
        assert_eq!(report.resampled, 2);
        assert_eq!(report.passed_through, 1);
    }

    #[test]
    fn test_dedicated_pool() {
        let config = ResampleConfig::new().with_target_frames(30).with_threads(2);
        let mut ds = Dataset::new();
        for i in 1..=16 {
            ds.push(clip(i * 3), format!("L{i}"));
        }
        let report = resample_dataset(&ds, &config).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.dataset.len(), 16);
        assert_eq!(report.dataset.records()[7].label.as_str(), "L8");
    }

    #[test]
    fn test_invalid_config_aborts() {
        let err = resample_dataset(&mixed(), &ResampleConfig::new().with_target_frames(0));
        assert!(matches!(err, Err(ResampleError::InvalidTargetLength(0))));
    }

    #[test]
    fn test_empty_dataset() {
        let report = resample_dataset(&Dataset::new(), &ResampleConfig::new()).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.total(), 0);
    }
}
