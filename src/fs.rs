//! Thin filesystem helpers used by the staleness checks and the executor.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Modification time of `path`.
pub fn mtime(path: impl AsRef<Path>) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

/// `Ok(false)` when the path does not exist; other stat failures are errors.
pub fn file_exists(path: impl AsRef<Path>) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Creates `path` unless it already exists. Returns whether it was created.
pub fn mkdir_if_not_exists(path: impl AsRef<Path>) -> io::Result<bool> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(false);
    }
    match fs::create_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Makes sure the directory that will hold `file` exists.
pub fn ensure_parent_dir(file: impl AsRef<Path>) -> io::Result<()> {
    match file.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            mkdir_if_not_exists(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Base name of `path`, accepting both `/` and `\` as separators.
pub fn path_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Base name of `path` with its last extension removed.
///
/// `dir/file.c` -> `file`, `file.tar.gz` -> `file.tar`, `noext` -> `noext`.
pub fn filename_no_ext(path: &str) -> String {
    let base = path_name(path);
    match base.rfind('.') {
        Some(0) | None => base.to_string(),
        Some(dot) => base[..dot].to_string(),
    }
}
