//! # nb CLI Entry Point
//!
//! Drives the orchestrator from the command line:
//! - `nb build` compiles every C/C++ file in a directory into its own binary
//! - `nb stale` answers whether an output is older than its inputs
//! - `nb clean` removes the output directory

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nobuild::build::{self, BuildOptions};
use nobuild::config::{self, CONFIG_FILE};
use nobuild::{Executor, Level, Staleness, needs_rebuild};

#[derive(Parser)]
#[command(name = "nb")]
#[command(about = "Incremental builds from plain command lines", version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Show debug output (staleness decisions, skipped builds)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only show warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
    /// Omit timestamps from log lines
    #[arg(long, global = true)]
    no_time: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every source file in a directory
    Build {
        /// Directory to scan for .c/.cpp files [default: src]
        #[arg(long)]
        src_dir: Option<PathBuf>,
        /// Directory receiving the binaries [default: out]
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Run all compiler processes at once
        #[arg(short, long)]
        parallel: bool,
        /// Rebuild even if outputs are up to date
        #[arg(short, long)]
        force: bool,
    },
    /// Check whether OUTPUT is older than any of INPUTS
    Stale {
        output: PathBuf,
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Remove the output directory
    Clean {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config(&cli.config)?;
    if cli.verbose {
        config.log.level = Level::Debug;
    } else if cli.quiet {
        config.log.level = Level::Warn;
    }
    if cli.no_color {
        config.log.color = Some(false);
    }
    if cli.no_time {
        config.log.time = false;
    }

    let exec = Executor::new(config.logger());
    colored::control::set_override(exec.logger().color());

    match cli.command {
        Commands::Build {
            src_dir,
            out_dir,
            parallel,
            force,
        } => {
            let mut opts = BuildOptions::from_config(&config.build);
            if let Some(dir) = src_dir {
                opts.src_dir = dir;
            }
            if let Some(dir) = out_dir {
                opts.out_dir = dir;
            }
            opts.parallel = parallel;
            opts.force = force;

            if !build::build_all(&exec, &config.build, &opts)? {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Stale { output, inputs } => match needs_rebuild(&output, &inputs) {
            Ok(Staleness::Stale) => {
                println!("stale");
                Ok(())
            }
            Ok(Staleness::UpToDate) => {
                println!("up to date");
                Ok(())
            }
            Err(e) => {
                exec.logger().error(e);
                std::process::exit(2);
            }
        },

        Commands::Clean { out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.build.out_dir());
            build::clean(&out_dir, exec.logger())?;
            Ok(())
        }
    }
}
