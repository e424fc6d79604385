//! Running commands.
//!
//! [`Executor::run`] compiles only when the command's output is stale,
//! [`Executor::run_always`] compiles unconditionally. Both take the command
//! by value and either wait for it or, when given a [`Procs`] pool, hand the
//! running process to the pool and return at once.
//!
//! ```no_run
//! use nobuild::{Cmd, Executor, Logger, Procs};
//!
//! let exec = Executor::new(Logger::default());
//! let mut procs = Procs::new();
//! for (src, out) in [("a.c", "out/a"), ("b.c", "out/b")] {
//!     exec.run(Cmd::default_c_build(src, Some(out)), Some(&mut procs));
//! }
//! if !exec.wait_all(&mut procs) {
//!     std::process::exit(1);
//! }
//! ```

use crate::cmd::Cmd;
use crate::fs;
use crate::log::Logger;
use crate::process::{Proc, Procs};
use crate::stale::{Staleness, needs_rebuild1};
use std::io;
use std::process::{Child, Command, Stdio};

/// Creates OS processes for commands.
pub trait Launcher {
    fn launch(&self, cmd: &Cmd) -> io::Result<Child>;
}

impl<L: Launcher + ?Sized> Launcher for &L {
    fn launch(&self, cmd: &Cmd) -> io::Result<Child> {
        (**self).launch(cmd)
    }
}

/// Spawns directly, inheriting stdio and the working directory. No shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, cmd: &Cmd) -> io::Result<Child> {
        let (program, args) = cmd
            .args()
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;
        Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
    }
}

#[derive(Debug)]
pub struct Executor<L = SystemLauncher> {
    log: Logger,
    launcher: L,
}

impl Executor<SystemLauncher> {
    pub fn new(log: Logger) -> Self {
        Self {
            log,
            launcher: SystemLauncher,
        }
    }
}

impl<L: Launcher> Executor<L> {
    pub fn with_launcher(log: Logger, launcher: L) -> Self {
        Self { log, launcher }
    }

    pub fn logger(&self) -> &Logger {
        &self.log
    }

    /// Starts `cmd` without waiting. The full command line is echoed first.
    ///
    /// On failure the error is logged and the invalid handle returned.
    pub fn spawn(&self, cmd: &Cmd) -> Proc {
        let Some(program) = cmd.program() else {
            self.log.error("Invalid command: empty");
            return Proc::invalid();
        };

        self.log.cmd(cmd);

        match self.launcher.launch(cmd) {
            Ok(child) => Proc::new(child, cmd.source().unwrap_or(program)),
            Err(e) => {
                self.log.error(format!("Could not start {}: {}", program, e));
                Proc::invalid()
            }
        }
    }

    /// Runs `cmd` only if its output is missing or older than its source.
    ///
    /// The command must follow the `[compiler, ..., source, "-o", output]`
    /// convention; a command that cannot be introspected is an error, not
    /// a reason to run it blindly. Use [`Executor::run_always`] for those.
    pub fn run(&self, cmd: Cmd, procs: Option<&mut Procs>) -> bool {
        let target = match cmd.infer() {
            Ok(t) => t,
            Err(e) => {
                self.log
                    .error(format!("Could not extract source or output from command: {}", e));
                return false;
            }
        };

        match needs_rebuild1(target.output, target.source) {
            Ok(Staleness::UpToDate) => {
                self.log.debug(format!("Up to date: {}", target.output));
                true
            }
            Ok(Staleness::Stale) => self.run_always(cmd, procs),
            Err(e) => {
                self.log.error(e);
                false
            }
        }
    }

    /// Runs `cmd` regardless of timestamps.
    ///
    /// With a pool the process is added to it and `true` means it started.
    /// Without one the call blocks and `true` means it exited with status zero.
    pub fn run_always(&self, cmd: Cmd, procs: Option<&mut Procs>) -> bool {
        if cmd.is_empty() {
            self.log.error("Invalid command: empty");
            return false;
        }

        if let Some(output) = cmd.output()
            && let Err(e) = fs::ensure_parent_dir(output)
        {
            self.log
                .error(format!("Could not create directory for {}: {}", output, e));
            return false;
        }

        let proc = self.spawn(&cmd);
        if !proc.is_valid() {
            return false;
        }

        match procs {
            Some(procs) => {
                procs.push(proc);
                true
            }
            None => {
                if cmd.is_async() {
                    self.log
                        .warn(format!("No process pool for async command, waiting: {}", cmd));
                }
                proc.wait(&self.log)
            }
        }
    }

    pub fn wait(&self, proc: Proc) -> bool {
        proc.wait(&self.log)
    }

    pub fn wait_all(&self, procs: &mut Procs) -> bool {
        procs.wait_all(&self.log)
    }
}
