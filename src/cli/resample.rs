// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;
use std::time::Instant;

use crate::batch::{BatchReport, resample_dataset};
use crate::cli::args::ResampleArgs;
use crate::cli::logging::set_verbose;
use crate::error::Result;
use crate::{Dataset, ResampleConfig, VERSION};
use crate::{error, info, section, success, verbose, warn};

/// Run the resample command, exiting with status 1 on failure.
pub fn run_resample(args: &ResampleArgs) {
    set_verbose(args.verbose);
    if resample_command(args).is_err() {
        process::exit(1);
    }
}

/// Load, resample and save a dataset as described by `args`.
///
/// Failures are logged with the offending path before being returned. Verbosity
/// is left to the caller.
///
/// # Errors
///
/// * [`crate::ResampleError::InvalidTargetLength`] for `--frames 0`.
/// * [`crate::ResampleError::Io`] or [`crate::ResampleError::Serialization`] if the
///   input cannot be read or the output cannot be written.
#[allow(clippy::cast_precision_loss)]
pub fn resample_command(args: &ResampleArgs) -> Result<BatchReport> {
    let config = ResampleConfig::new()
        .with_target_frames(args.frames)
        .with_policy(args.policy)
        .with_threads(args.threads)
        .with_visibility(!args.drop_visibility);

    config.validate().inspect_err(|e| error!("{e}"))?;

    verbose!("pose-resampler {VERSION}");
    verbose!(
        "Target frames: {}, policy: {}, threads: {}",
        config.target_frames,
        config.policy,
        if config.num_threads == 0 {
            "auto".to_string()
        } else {
            config.num_threads.to_string()
        }
    );

    let dataset = Dataset::load(&args.input)
        .inspect_err(|e| error!("Failed to load {}: {e}", args.input.display()))?;
    verbose!(
        "Loaded {} sequences from {}",
        dataset.len(),
        args.input.display()
    );
    if dataset.is_empty() {
        warn!("Dataset {} has no sequences.", args.input.display());
    }

    let start = Instant::now();
    let report = resample_dataset(&dataset, &config).inspect_err(|e| error!("{e}"))?;
    let elapsed = start.elapsed();

    if !report.is_clean() {
        section!("Skipped sequences");
        for failure in &report.failures {
            info!(
                "  #{} '{}': {}",
                failure.index, failure.label, failure.error
            );
        }
    }

    report
        .dataset
        .save(&args.output)
        .inspect_err(|e| error!("Failed to save {}: {e}", args.output.display()))?;

    section!("Summary");
    verbose!(
        "Processed {} sequences in {:.1}ms: {} resampled, {} passed through, {} skipped",
        report.total(),
        elapsed.as_secs_f64() * 1000.0,
        report.resampled,
        report.passed_through,
        report.failures.len()
    );
    success!(
        "Saved {} sequences to {}",
        report.dataset.len(),
        args.output.display()
    );
    Ok(report)
}
