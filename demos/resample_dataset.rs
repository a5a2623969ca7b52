// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Example script demonstrating the capture-to-training-data flow.
//!
//! This example covers:
//! 1. Filtering simulated detections and recording labelled segments.
//! 2. Saving the raw dataset and resampling it to a fixed frame count.
//! 3. Exporting classifier inputs in node-major layout.

use std::path::Path;

use pose_resampler::{
    Dataset, FilterState, Keypoint, KeypointFilter, ResampleConfig, Result, SegmentRecorder,
    resample_dataset,
};

/// A fake BlazePose detection: every landmark sways horizontally with `phase`.
#[allow(clippy::cast_precision_loss)]
fn simulated_detection(phase: f64, visible: bool) -> Vec<Keypoint> {
    (0..33)
        .map(|i| {
            let x = 0.5 + 0.1 * (phase + i as f64 * 0.1).sin();
            let y = i as f64 / 33.0;
            Keypoint::new(x, y, 0.0).with_visibility(if visible { 0.95 } else { 0.2 })
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn main() -> Result<()> {
    // 1. Record two segments of different lengths
    let filter = KeypointFilter::new();
    let mut state = FilterState::new();
    let mut recorder = SegmentRecorder::new();
    let mut dataset = Dataset::new();

    for (label, frames) in [("wave", 45), ("bow", 72)] {
        for i in 0..frames {
            // Every tenth detection is occluded and gets rejected
            let detection = simulated_detection(i as f64 * 0.2, i % 10 != 9);
            let (next, frame) = filter.apply(state, Some(detection.as_slice()));
            state = next;
            if let Some(frame) = frame {
                recorder.push(frame);
            }
        }
        if let Some(record) = recorder.finish(label)? {
            println!("Recorded '{}' with {} frames", record.label, record.sequence.len());
            dataset.push(record.sequence, record.label);
        }
    }

    // 2. Save, then resample every clip to 60 frames
    let out_dir = Path::new("runs");
    dataset.save(out_dir.join("pose_dataset.json"))?;

    let config = ResampleConfig::new().with_target_frames(60);
    let report = resample_dataset(&dataset, &config)?;
    report.dataset.save(out_dir.join("pose_dataset_60.json"))?;
    println!(
        "Resampled {} sequences, {} skipped",
        report.resampled,
        report.failures.len()
    );

    // 3. Classifier inputs
    let map = report.dataset.label_map();
    for example in report.dataset.to_training_examples(&map)? {
        println!("class {} input {:?}", example.class, example.input.dim());
    }

    println!("\nDone! Datasets written to {}", out_dir.display());
    Ok(())
}
