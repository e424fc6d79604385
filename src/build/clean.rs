//! Build output cleanup.

use crate::log::Logger;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

/// Removes `out_dir`. Returns whether anything was deleted.
pub fn clean(out_dir: &Path, log: &Logger) -> Result<bool> {
    let exists = crate::fs::file_exists(out_dir)
        .with_context(|| format!("Failed to inspect {}", out_dir.display()))?;
    if !exists {
        log.info(format!("{} Nothing to clean", "!".yellow()));
        return Ok(false);
    }

    fs::remove_dir_all(out_dir)
        .with_context(|| format!("Failed to remove {}", out_dir.display()))?;
    log.info(format!("{} Removed {}", "✓".green(), out_dir.display()));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(out.join("nested")).unwrap();
        fs::write(out.join("nested").join("app"), "").unwrap();

        assert!(clean(&out, &Logger::silent()).unwrap());
        assert!(!out.exists());
        assert!(!clean(&out, &Logger::silent()).unwrap());
    }
}
