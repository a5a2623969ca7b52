// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use crate::cli::args::InspectArgs;
use crate::dataset::DatasetSummary;
use crate::utils::pluralize;
use crate::{Dataset, error, info, section};

/// Run the inspect command.
pub fn run_inspect(args: &InspectArgs) {
    let dataset = match Dataset::load(&args.input) {
        Ok(ds) => ds,
        Err(e) => {
            error!("Failed to load {}: {e}", args.input.display());
            process::exit(1);
        }
    };

    section!("{}", args.input.display());
    for line in summary_lines(&dataset.summary()) {
        info!("{line}");
    }
}

/// Human-readable lines describing a dataset summary.
#[must_use]
pub fn summary_lines(summary: &DatasetSummary) -> Vec<String> {
    let shape = |v: Option<usize>| v.map_or_else(|| "mixed".to_string(), |n| n.to_string());

    let mut lines = vec![
        format!(
            "{} {}, {} {}",
            summary.records,
            pluralize("sequence", summary.records),
            summary.label_counts.len(),
            pluralize("label", summary.label_counts.len())
        ),
        format!(
            "Frames per sequence: min {}, max {}, mean {:.1}",
            summary.min_len, summary.max_len, summary.mean_len
        ),
        format!(
            "Keypoints per frame: {}, coordinates per keypoint: {}",
            shape(summary.keypoints),
            shape(summary.dims)
        ),
    ];
    for (label, count) in &summary.label_counts {
        lines.push(format!("  {label}: {count}"));
    }
    lines
}
