//! # nobuild - embedded incremental build orchestrator
//!
//! Build steps are plain data: a [`Cmd`] holds the argv of one compiler or
//! linker invocation. The [`Executor`] decides from file timestamps whether
//! a step is stale, runs the stale ones as child processes (optionally many
//! at once through a [`Procs`] pool) and reports success as a `bool`. A
//! build program can also rebuild and re-exec itself when its own source
//! changes, see [`rebuild`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use nobuild::{Bootstrap, Cmd, Executor, Logger};
//!
//! # fn main() -> std::io::Result<()> {
//! let exec = Executor::new(Logger::default());
//! Bootstrap::new("src/bin/build.rs")
//!     .with_output(std::env::current_exe()?)
//!     .build_with(["cargo", "build", "--bin", "build"].into_iter().collect())
//!     .run_or_exit(&exec);
//!
//! let mut cmd = Cmd::new();
//! cmd.push(["cc", "-Wall", "-Wextra", "main.c", "-o", "out/main"]);
//! if !exec.run(cmd, None) {
//!     std::process::exit(1);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cmd`] - Command lines and their source/output introspection
//! - [`stale`] - Timestamp staleness checks
//! - [`process`] - Child process handles and pools
//! - [`exec`] - Running commands, synchronously or into a pool
//! - [`rebuild`] - Self-rebuild of the build program
//! - [`build`] - Directory batch driver used by the `nb` binary

/// Directory batch builds and cleanup.
pub mod build;

/// Command lines as data.
pub mod cmd;

/// Configuration file parsing (`nobuild.toml`).
pub mod config;

/// Error types.
pub mod error;

/// Command execution.
pub mod exec;

/// Filesystem helpers.
pub mod fs;

/// Leveled terminal logger.
pub mod log;

/// Child process handles and pools.
pub mod process;

/// Self-rebuild bootstrap.
pub mod rebuild;

/// Staleness checks.
pub mod stale;

pub use cmd::Cmd;
pub use error::{BootstrapError, CmdError, StaleError};
pub use exec::{Executor, Launcher, SystemLauncher};
pub use log::{Level, Logger};
pub use process::{Proc, Procs};
pub use rebuild::{Bootstrap, ImageReplacer, auto_rebuild, auto_rebuild_plus};
pub use stale::{Staleness, needs_rebuild, needs_rebuild1};
