//! Child process handles and pools.
//!
//! A [`Proc`] is one spawned OS process, or the invalid sentinel left behind
//! by a failed spawn. Waiting consumes the handle, so a process can be
//! reaped at most once. A [`Procs`] pool collects handles launched
//! concurrently and waits for all of them in one call.
//!
//! There is no timeout and no kill: a child that never exits blocks the
//! waiting thread forever. Pools are plain owned values with no internal
//! locking; share one across threads only behind your own synchronization.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use unix::{prepare_overwrite, replace_image, signal_of};

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub(crate) use windows::{prepare_overwrite, replace_image, signal_of};

use crate::log::Logger;
use std::process::Child;

#[derive(Debug)]
pub struct Proc {
    child: Option<Child>,
    /// What this process builds, used to tell failures in a batch apart.
    label: String,
}

impl Proc {
    pub fn new(child: Child, label: impl Into<String>) -> Self {
        Self {
            child: Some(child),
            label: label.into(),
        }
    }

    /// The handle a failed spawn produces.
    pub fn invalid() -> Self {
        Self {
            child: None,
            label: String::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.child.is_some()
    }

    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Blocks until the process exits. Success means exit status zero.
    pub fn wait(mut self, log: &Logger) -> bool {
        let Some(mut child) = self.child.take() else {
            log.error("Cannot wait on an invalid process handle");
            return false;
        };

        let status = match child.wait() {
            Ok(status) => status,
            Err(e) => {
                log.error(format!("Could not wait for {}: {}", self.label, e));
                return false;
            }
        };

        if status.success() {
            return true;
        }

        match (status.code(), signal_of(&status)) {
            (Some(code), _) => {
                log.error(format!("{} failed with exit code {}", self.label, code));
            }
            (None, Some(signal)) => {
                log.error(format!("{} terminated by signal {}", self.label, signal));
            }
            (None, None) => {
                log.error(format!("{} terminated abnormally ({})", self.label, status));
            }
        }
        false
    }
}

#[derive(Debug, Default)]
pub struct Procs {
    handles: Vec<Proc>,
}

impl Procs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, proc: Proc) {
        self.handles.push(proc);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every process submitted so far and empties the pool.
    ///
    /// Returns `true` only if all of them exited with status zero. Invalid
    /// handles are skipped rather than counted as failures.
    pub fn wait_all(&mut self, log: &Logger) -> bool {
        let mut all_ok = true;
        for proc in self.handles.drain(..) {
            if !proc.is_valid() {
                log.debug("Skipping invalid process handle");
                continue;
            }
            if !proc.wait(log) {
                all_ok = false;
            }
        }
        all_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Level;
    use crate::log::tests::captured;

    #[test]
    fn test_invalid_handle_fails_without_blocking() {
        let (log, out) = captured(Level::Debug);
        let proc = Proc::invalid();
        assert!(!proc.is_valid());
        assert_eq!(proc.id(), None);
        assert!(!proc.wait(&log));
        assert!(out.contents().contains("invalid process handle"));
    }

    #[test]
    fn test_empty_pool_succeeds() {
        let (log, _) = captured(Level::Debug);
        let mut procs = Procs::new();
        assert!(procs.wait_all(&log));
        assert!(procs.is_empty());
    }

    #[test]
    fn test_pool_skips_invalid_handles() {
        let (log, _) = captured(Level::Debug);
        let mut procs = Procs::new();
        procs.push(Proc::invalid());
        procs.push(Proc::invalid());
        assert!(procs.wait_all(&log));
        assert_eq!(procs.len(), 0);
    }

    #[cfg(unix)]
    fn sh(script: &str) -> Proc {
        let child = std::process::Command::new("sh").args(["-c", script]).spawn().unwrap();
        Proc::new(child, format!("sh -c '{script}'"))
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_reports_exit_code() {
        let (log, out) = captured(Level::Debug);
        assert!(sh("exit 0").wait(&log));
        assert!(!sh("exit 3").wait(&log));
        assert!(out.contents().contains("failed with exit code 3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_reports_signal() {
        let (log, out) = captured(Level::Debug);
        assert!(!sh("kill -TERM $$").wait(&log));
        assert!(out.contents().contains("terminated by signal 15"));
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_all_aggregates_and_clears() {
        let (log, out) = captured(Level::Debug);
        let mut procs = Procs::new();
        procs.push(sh("exit 0"));
        procs.push(sh("exit 1"));
        procs.push(Proc::invalid());
        assert_eq!(procs.len(), 3);

        assert!(!procs.wait_all(&log));
        assert!(procs.is_empty());
        assert!(out.contents().contains("sh -c 'exit 1' failed with exit code 1"));

        // reusable for the next batch
        procs.push(sh("true"));
        assert!(procs.wait_all(&log));
    }
}
