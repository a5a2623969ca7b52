// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for dataset resampling.
//!
//! This module contains the command-line interface logic, including argument parsing
//! and the `resample` and `inspect` command implementations.

// Modules
/// CLI arguments.
pub mod args;

/// Dataset statistics.
pub mod inspect;

/// Colored console output.
pub mod logging;

/// Resampling logic.
pub mod resample;
