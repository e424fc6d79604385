//! Error types for the orchestrator core.
//!
//! Process failures are reported as `bool` after logging; these enums cover
//! the cases where the caller needs to tell failure kinds apart.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A command could not be introspected for its source and output.
#[derive(Debug, Error)]
pub enum CmdError {
    #[error("empty command")]
    Empty,

    #[error("no `-o <output>` in command: {0}")]
    MissingOutput(String),

    #[error("no source file before `-o` in command: {0}")]
    MissingSource(String),
}

/// The staleness of an output could not be determined.
#[derive(Debug, Error)]
pub enum StaleError {
    #[error("could not stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no input paths given for {}", .0.display())]
    NoInputs(PathBuf),
}

/// Self-rebuild could not complete. Both variants are fatal for the caller.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("rebuild of {} failed", .0.display())]
    Rebuild(PathBuf),

    #[error(
        "no build command for {}: only C-family sources have a default, use `Bootstrap::build_with`",
        .0.display()
    )]
    NoBuildCommand(PathBuf),

    #[error("failed to restart {}: {source}", .program.display())]
    Replace {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}
