// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_TARGET_FRAMES, LengthPolicy};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Resample Options:
    --input, -i <INPUT>    Dataset JSON file to read
    --output, -o <OUTPUT>  Dataset JSON file to write
    --frames, -f <FRAMES>  Target frame count [default: 100]
    --policy <POLICY>      always | preserve-longer [default: always]
    --threads <THREADS>    Worker threads, 0 = automatic [default: 0]
    --drop-visibility      Do not carry visibility scores into the output
    --verbose <BOOL>       Show verbose output [default: true]

Examples:
    pose-resampler resample --input pose_dataset.json --output pose_dataset_60.json --frames 60
    pose-resampler resample -i clips.json -o clips_fixed.json --policy preserve-longer
    pose-resampler inspect --input pose_dataset_60.json"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resample every sequence of a dataset to a fixed frame count
    Resample(ResampleArgs),
    /// Print summary statistics of a dataset
    Inspect(InspectArgs),
}

/// Arguments for the resample command.
#[derive(Args, Debug)]
pub struct ResampleArgs {
    /// Dataset JSON file to read
    #[arg(short, long)]
    pub input: PathBuf,

    /// Dataset JSON file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target frame count
    #[arg(short, long, default_value_t = DEFAULT_TARGET_FRAMES)]
    pub frames: usize,

    /// Treatment of sequences already at or above the target length
    #[arg(long, default_value_t = LengthPolicy::Always)]
    pub policy: LengthPolicy,

    /// Worker threads (0 = automatic)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Do not carry visibility scores into the output
    #[arg(long, default_value_t = false)]
    pub drop_visibility: bool,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

/// Arguments for the inspect command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset JSON file to read
    #[arg(short, long)]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resample_args_defaults() {
        let args = Cli::parse_from(["app", "resample", "--input", "in.json", "--output", "out.json"]);
        match args.command {
            Commands::Resample(resample_args) => {
                assert_eq!(resample_args.input, PathBuf::from("in.json"));
                assert_eq!(resample_args.output, PathBuf::from("out.json"));
                assert_eq!(resample_args.frames, 100);
                assert_eq!(resample_args.policy, LengthPolicy::Always);
                assert_eq!(resample_args.threads, 0);
                assert!(!resample_args.drop_visibility);
                assert!(resample_args.verbose);
            }
            Commands::Inspect(_) => panic!("expected resample command"),
        }
    }

    #[test]
    fn test_resample_args_custom() {
        let args = Cli::parse_from([
            "app",
            "resample",
            "-i",
            "in.json",
            "-o",
            "out.json",
            "--frames",
            "60",
            "--policy",
            "preserve-longer",
            "--threads",
            "4",
            "--drop-visibility",
            "--verbose",
            "false",
        ]);
        match args.command {
            Commands::Resample(resample_args) => {
                assert_eq!(resample_args.frames, 60);
                assert_eq!(resample_args.policy, LengthPolicy::PreserveLonger);
                assert_eq!(resample_args.threads, 4);
                assert!(resample_args.drop_visibility);
                assert!(!resample_args.verbose);
            }
            Commands::Inspect(_) => panic!("expected resample command"),
        }
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let parsed = Cli::try_parse_from([
            "app", "resample", "-i", "a.json", "-o", "b.json", "--policy", "never",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_inspect_args() {
        let args = Cli::parse_from(["app", "inspect", "-i", "data.json"]);
        match args.command {
            Commands::Inspect(inspect_args) => {
                assert_eq!(inspect_args.input, PathBuf::from("data.json"));
            }
            Commands::Resample(_) => panic!("expected inspect command"),
        }
    }
}
