//! Windows process primitives.
//!
//! Windows has no `exec`. Replacement is emulated by running the new binary
//! as a child and exiting with its exit code, so the process id changes.

use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

pub(crate) fn signal_of(_status: &ExitStatus) -> Option<i32> {
    None
}

pub(crate) fn replace_image(program: &Path) -> io::Error {
    match Command::new(program).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => e,
    }
}

/// Moves a possibly running `output` aside so the compiler can write a new one.
///
/// A running executable cannot be overwritten on Windows, but it can be
/// renamed. `rename` replaces a leftover `.old` from the previous rebuild.
pub(crate) fn prepare_overwrite(output: &Path) -> io::Result<()> {
    if !output.exists() {
        return Ok(());
    }
    fs::rename(output, output.with_extension("old"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_overwrite_replaces_previous_old() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("build.exe");
        let old = dir.path().join("build.old");
        fs::write(&exe, "current").unwrap();
        fs::write(&old, "stale").unwrap();

        prepare_overwrite(&exe).unwrap();
        assert!(!exe.exists());
        assert_eq!(fs::read_to_string(&old).unwrap(), "current");

        // nothing to move aside
        prepare_overwrite(&exe).unwrap();
    }
}
