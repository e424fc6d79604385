//! POSIX process primitives.

use std::io;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Signal that terminated the process, if any.
pub(crate) fn signal_of(status: &ExitStatus) -> Option<i32> {
    status.signal()
}

/// Replaces the current process image with `program`. Only returns on failure.
pub(crate) fn replace_image(program: &Path) -> io::Error {
    Command::new(program).exec()
}

/// A running binary can be overwritten in place on unix.
pub(crate) fn prepare_overwrite(_output: &Path) -> io::Result<()> {
    Ok(())
}
