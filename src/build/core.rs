use crate::cmd::is_c_family;
use crate::config::BuildConfig;
use crate::exec::{Executor, Launcher};
use crate::process::Procs;
use anyhow::{Result, bail};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// What `build_all` compiles and how.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub src_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Start every compile at once and wait for the whole batch.
    pub parallel: bool,
    /// Ignore timestamps.
    pub force: bool,
}

impl BuildOptions {
    pub fn from_config(build: &BuildConfig) -> Self {
        Self {
            src_dir: build.src_dir(),
            out_dir: build.out_dir(),
            parallel: false,
            force: false,
        }
    }
}

// --- Helper: Collect Source Files ---
pub fn collect_sources(dir: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_c_family(p))
        .collect();
    sources.sort();
    sources
}

/// `src_dir/x.c` -> `out_dir/x` (plus `.exe` on Windows).
pub fn output_for(source: &Path, out_dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_dir.join(format!("{}{}", stem, std::env::consts::EXE_SUFFIX))
}

// --- CORE: Build every source into its own binary ---
pub fn build_all<L: Launcher>(
    exec: &Executor<L>,
    build: &BuildConfig,
    opts: &BuildOptions,
) -> Result<bool> {
    let start_time = Instant::now();
    let log = exec.logger();

    if !opts.src_dir.is_dir() {
        bail!(
            "Source directory {} not found.\n\n\
            Tip: pass --src-dir or set `src_dir` under [build] in nobuild.toml.",
            opts.src_dir.display()
        );
    }

    let sources = collect_sources(&opts.src_dir);
    if sources.is_empty() {
        log.warn(format!("No source files found in {}", opts.src_dir.display()));
        log.hint(format!(
            "Looked for .{} files; pass --src-dir to build another directory",
            crate::cmd::C_SOURCE_EXTENSIONS.join(", .")
        ));
        return Ok(false);
    }

    log.info(format!(
        "Building {} source(s) from {} into {}",
        sources.len(),
        opts.src_dir.display(),
        opts.out_dir.display()
    ));

    let mut procs = Procs::new();
    let mut success = true;

    for source in &sources {
        let output = output_for(source, &opts.out_dir);
        let mut cmd = build.compile_cmd(source, &output);
        cmd.set_async(opts.parallel);

        let pool = if opts.parallel { Some(&mut procs) } else { None };
        let ok = if opts.force {
            exec.run_always(cmd, pool)
        } else {
            exec.run(cmd, pool)
        };

        if !ok {
            success = false;
            // A sequential batch stops at the first broken build
            if !opts.parallel {
                break;
            }
        }
    }

    if !exec.wait_all(&mut procs) {
        success = false;
    }

    if success {
        log.info(format!(
            "{} Build finished in {:.2?}",
            "✓".green(),
            start_time.elapsed()
        ));
    } else {
        log.error(format!("{} Build failed", "x".red()));
    }

    Ok(success)
}
