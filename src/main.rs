// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use pose_resampler::cli::args::{Cli, Commands};
use pose_resampler::cli::inspect::run_inspect;
use pose_resampler::cli::resample::run_resample;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Resample(args) => run_resample(args),
        Commands::Inspect(args) => run_inspect(args),
    }
}
