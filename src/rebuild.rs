//! Self-rebuilding build programs.
//!
//! A build program checks itself before doing anything else. If its own
//! source, or one of the extra files it depends on, is newer than the binary
//! that is running, the source is rebuilt and the fresh binary replaces the
//! current process. A stale build program therefore never runs outdated rules.
//!
//! C-family sources have a default compiler invocation, see [`auto_rebuild`].
//! Anything else names its build command. A Rust build program links this
//! crate, so it is rebuilt through cargo:
//!
//! ```no_run
//! use nobuild::{Bootstrap, Cmd, Executor, Logger};
//!
//! # fn main() -> std::io::Result<()> {
//! let exec = Executor::new(Logger::default());
//! let cargo: Cmd = ["cargo", "build", "--bin", "build"].into_iter().collect();
//! Bootstrap::new("src/bin/build.rs")
//!     .with_output(std::env::current_exe()?)
//!     .with_deps(["Cargo.toml"])
//!     .build_with(cargo)
//!     .run_or_exit(&exec);
//! // from here on the binary is known to match its sources
//! # Ok(())
//! # }
//! ```

use crate::cmd::{Cmd, is_c_family};
use crate::error::BootstrapError;
use crate::exec::{Executor, Launcher};
use crate::fs::{filename_no_ext, mtime};
use crate::log::Logger;
use crate::process;
use std::io;
use std::path::{Path, PathBuf};

/// Swaps the running program for another executable.
pub trait ImageReplacer {
    /// Starts `program` in place of the current process. Returns only on failure.
    fn replace(&self, program: &Path) -> io::Error;
}

/// `exec` on unix; spawn, wait and exit with the child's code on Windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessImage;

impl ImageReplacer for ProcessImage {
    fn replace(&self, program: &Path) -> io::Error {
        process::replace_image(program)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    UpToDate,
    Rebuild,
    /// The program's own source is not readable, e.g. a packaged binary.
    SourceUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    UpToDate,
    SourceUnavailable,
}

#[derive(Debug, Clone)]
pub struct Bootstrap {
    source: PathBuf,
    output: PathBuf,
    deps: Vec<PathBuf>,
    build: Option<Cmd>,
}

impl Bootstrap {
    /// The binary is expected next to the working directory, named after the
    /// source with its extension stripped (`build.c` -> `build`).
    pub fn new(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let stem = filename_no_ext(&source.to_string_lossy());
        let output = PathBuf::from(format!("{}{}", stem, std::env::consts::EXE_SUFFIX));
        Self {
            source,
            output,
            deps: Vec::new(),
            build: None,
        }
    }

    pub fn with_deps<I, P>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.deps.extend(deps.into_iter().map(Into::into));
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Replaces the default compiler invocation used to rebuild.
    pub fn build_with(mut self, cmd: Cmd) -> Self {
        self.build = Some(cmd);
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn deps(&self) -> &[PathBuf] {
        &self.deps
    }

    /// The explicit build command, or the default C compiler invocation for
    /// C-family sources. Anything else has no default.
    fn build_cmd(&self) -> Result<Cmd, BootstrapError> {
        if let Some(cmd) = &self.build {
            return Ok(cmd.clone());
        }
        if !is_c_family(&self.source) {
            return Err(BootstrapError::NoBuildCommand(self.source.clone()));
        }
        let source = self.source.to_string_lossy();
        let output = self.output.to_string_lossy();
        Ok(Cmd::default_c_build(&source, Some(&*output)))
    }

    pub fn check(&self, log: &Logger) -> Check {
        let source_time = match mtime(&self.source) {
            Ok(t) => t,
            Err(e) => {
                log.error(format!(
                    "No such file or directory ({}): {}",
                    self.source.display(),
                    e
                ));
                return Check::SourceUnavailable;
            }
        };

        let output_time = match mtime(&self.output) {
            Ok(t) => t,
            Err(_) => return Check::Rebuild,
        };

        if source_time > output_time {
            return Check::Rebuild;
        }

        // keep going after the first hit so every newer dependency is reported
        let mut rebuild = false;
        for dep in &self.deps {
            match mtime(dep) {
                Ok(t) if t > output_time => {
                    log.debug(format!(
                        "Dependency {} is newer than binary, rebuild needed",
                        dep.display()
                    ));
                    rebuild = true;
                }
                Ok(_) => {}
                Err(e) => {
                    log.warn(format!("Could not check dependency {}: {}", dep.display(), e));
                }
            }
        }

        if rebuild { Check::Rebuild } else { Check::UpToDate }
    }

    /// Checks, rebuilds and replaces the running process if needed.
    ///
    /// `Ok` means no rebuild happened and the caller should carry on. After
    /// a rebuild there is nothing to return to: a successful replacement
    /// never comes back, so reaching the end is always an error.
    pub fn run<L: Launcher, R: ImageReplacer>(
        &self,
        exec: &Executor<L>,
        replacer: &R,
    ) -> Result<Outcome, BootstrapError> {
        let log = exec.logger();
        match self.check(log) {
            Check::UpToDate => {
                log.debug(format!("Up to date: {}", self.output.display()));
                return Ok(Outcome::UpToDate);
            }
            Check::SourceUnavailable => return Ok(Outcome::SourceUnavailable),
            Check::Rebuild => {}
        }

        let build = self.build_cmd()?;

        log.info(format!(
            "Rebuilding: {} -> {}",
            self.source.display(),
            self.output.display()
        ));

        if let Err(e) = process::prepare_overwrite(&self.output) {
            log.warn(format!("Could not move {} aside: {}", self.output.display(), e));
        }

        if !exec.run_always(build, None) {
            return Err(BootstrapError::Rebuild(self.source.clone()));
        }

        log.debug("Restarting with updated build executable...");
        let program = runnable_path(&self.output);
        let source = replacer.replace(&program);
        Err(BootstrapError::Replace { program, source })
    }

    /// [`Bootstrap::run`], terminating the process on any bootstrap error.
    pub fn run_or_exit<L: Launcher>(&self, exec: &Executor<L>) -> Outcome {
        match self.run(exec, &ProcessImage) {
            Ok(outcome) => outcome,
            Err(e) => exec.logger().fatal(e),
        }
    }
}

/// A bare file name would be looked up in PATH; anchor it to the working directory.
fn runnable_path(output: &Path) -> PathBuf {
    if output.is_relative() && output.parent().is_none_or(|p| p.as_os_str().is_empty()) {
        Path::new(".").join(output)
    } else {
        output.to_path_buf()
    }
}

/// Rebuilds and restarts the running program when `source` changed.
///
/// Only for C-family sources; other programs use [`Bootstrap::build_with`].
pub fn auto_rebuild<L: Launcher>(exec: &Executor<L>, source: impl Into<PathBuf>) -> Outcome {
    Bootstrap::new(source).run_or_exit(exec)
}

/// Like [`auto_rebuild`], also watching extra files such as shared headers.
pub fn auto_rebuild_plus<L, I, P>(exec: &Executor<L>, source: impl Into<PathBuf>, deps: I) -> Outcome
where
    L: Launcher,
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    Bootstrap::new(source).with_deps(deps).run_or_exit(exec)
}
