//! Timestamp-based staleness checks.
//!
//! An output is stale when it is missing or when any of its inputs has a
//! strictly newer modification time. Equal timestamps count as up to date,
//! so on filesystems with one-second granularity an input touched within
//! the same second as the last build will not trigger a rebuild.

use crate::error::StaleError;
use crate::fs::mtime;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// Output is missing or older than an input.
    Stale,
    UpToDate,
}

impl Staleness {
    pub fn is_stale(self) -> bool {
        self == Staleness::Stale
    }
}

/// Decides whether `output` has to be rebuilt from `inputs`.
///
/// A missing output is never an error. A missing input always is: a
/// declared dependency has to exist.
pub fn needs_rebuild<P: AsRef<Path>>(
    output: impl AsRef<Path>,
    inputs: &[P],
) -> Result<Staleness, StaleError> {
    let output = output.as_ref();
    if inputs.is_empty() {
        return Err(StaleError::NoInputs(output.to_path_buf()));
    }

    let output_time = match mtime(output) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Staleness::Stale),
        Err(e) => {
            return Err(StaleError::Stat {
                path: output.to_path_buf(),
                source: e,
            });
        }
    };

    // every input is stat'd, so a missing one is reported even after a newer one
    let mut stale = false;
    for input in inputs {
        let input = input.as_ref();
        let input_time = mtime(input).map_err(|e| StaleError::Stat {
            path: input.to_path_buf(),
            source: e,
        })?;
        if input_time > output_time {
            stale = true;
        }
    }

    Ok(if stale { Staleness::Stale } else { Staleness::UpToDate })
}

/// Single-input form of [`needs_rebuild`].
pub fn needs_rebuild1(
    output: impl AsRef<Path>,
    input: impl AsRef<Path>,
) -> Result<Staleness, StaleError> {
    needs_rebuild(output, &[input.as_ref()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::{Duration, SystemTime};

    fn touch(path: &Path, at: SystemTime) {
        if !path.exists() {
            fs::write(path, "").unwrap();
        }
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(at)
            .unwrap();
    }

    fn base() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    #[test]
    fn test_newer_input_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let (out, input) = (dir.path().join("main"), dir.path().join("main.c"));
        touch(&out, base());
        touch(&input, base() + Duration::from_secs(5));
        assert_eq!(needs_rebuild1(&out, &input).unwrap(), Staleness::Stale);
    }

    #[test]
    fn test_older_input_is_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let (out, input) = (dir.path().join("main"), dir.path().join("main.c"));
        touch(&input, base());
        touch(&out, base() + Duration::from_secs(5));
        assert_eq!(needs_rebuild1(&out, &input).unwrap(), Staleness::UpToDate);
    }

    #[test]
    fn test_equal_mtime_is_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let (out, input) = (dir.path().join("main"), dir.path().join("main.c"));
        touch(&input, base());
        touch(&out, base());
        assert_eq!(needs_rebuild1(&out, &input).unwrap(), Staleness::UpToDate);
    }

    #[test]
    fn test_missing_output_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("main.c");
        touch(&input, base());
        assert!(needs_rebuild1(dir.path().join("main"), &input).unwrap().is_stale());

        // regardless of whether the input exists
        let missing = dir.path().join("missing.c");
        assert!(needs_rebuild1(dir.path().join("main"), missing).unwrap().is_stale());
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("main");
        touch(&out, base());
        let err = needs_rebuild1(&out, dir.path().join("gone.c")).unwrap_err();
        assert!(matches!(err, StaleError::Stat { .. }));
        assert!(err.to_string().contains("gone.c"));
    }

    #[test]
    fn test_missing_input_after_newer_one_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("app");
        let newer = dir.path().join("app.c");
        let missing = dir.path().join("config.h");
        touch(&out, base());
        touch(&newer, base() + Duration::from_secs(10));

        let err = needs_rebuild(&out, &[&newer, &missing]).unwrap_err();
        assert!(matches!(err, StaleError::Stat { ref path, .. } if *path == missing));
    }

    #[test]
    fn test_any_newer_input_among_many() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("app");
        let a = dir.path().join("a.c");
        let b = dir.path().join("b.h");
        touch(&a, base());
        touch(&out, base() + Duration::from_secs(10));
        touch(&b, base() + Duration::from_secs(20));
        assert!(needs_rebuild(&out, &[&a, &b]).unwrap().is_stale());
        assert!(!needs_rebuild(&out, &[&a]).unwrap().is_stale());
    }

    #[test]
    fn test_no_inputs_is_an_error() {
        let inputs: [&Path; 0] = [];
        assert!(matches!(
            needs_rebuild("whatever", &inputs),
            Err(StaleError::NoInputs(_))
        ));
    }
}
