//! Optional `nobuild.toml` configuration.
//!
//! ```toml
//! [log]
//! level = "debug"   # debug, info, cmd, hint, warn, error, fatal, none
//! color = false     # default: auto-detect
//! time = true
//!
//! [build]
//! compiler = "clang"
//! flags = ["-O2", "-Wall"]
//! src_dir = "examples"
//! out_dir = "out"
//! ```

use crate::cmd::{self, Cmd};
use crate::log::{Level, Logger};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "nobuild.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct NbConfig {
    pub log: LogConfig,
    pub build: BuildConfig,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct LogConfig {
    pub level: Level,
    pub color: Option<bool>,
    pub time: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            color: None,
            time: true,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct BuildConfig {
    pub compiler: Option<String>,
    pub flags: Option<Vec<String>>,
    pub src_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

/// Reads `path`, falling back to defaults when the file does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<NbConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(NbConfig::default());
    }
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} - check file permissions", path.display()))?;
    toml::from_str(&config_str).with_context(|| {
        format!(
            "Failed to parse {} - check for syntax errors (missing quotes, brackets)",
            path.display()
        )
    })
}

impl NbConfig {
    pub fn logger(&self) -> Logger {
        let log = Logger::new(self.log.level).with_time(self.log.time);
        match self.log.color {
            Some(color) => log.with_color(color),
            None => log,
        }
    }
}

impl BuildConfig {
    pub fn src_dir(&self) -> PathBuf {
        self.src_dir.clone().unwrap_or_else(|| PathBuf::from("src"))
    }

    pub fn out_dir(&self) -> PathBuf {
        self.out_dir.clone().unwrap_or_else(|| PathBuf::from("out"))
    }

    /// Compiler for `source`: config, then `CC`/`CXX`, then the platform default.
    pub fn compiler_for(&self, source: &Path) -> String {
        if let Some(compiler) = &self.compiler {
            return compiler.clone();
        }
        if cmd::is_cxx(source) {
            std::env::var("CXX").unwrap_or_else(|_| cmd::default_cxx_compiler().to_string())
        } else {
            std::env::var("CC").unwrap_or_else(|_| cmd::default_c_compiler().to_string())
        }
    }

    /// `<compiler> <flags> <source> -o <output>`
    pub fn compile_cmd(&self, source: &Path, output: &Path) -> Cmd {
        let mut cmd = Cmd::new();
        cmd.arg(self.compiler_for(source));
        match &self.flags {
            Some(flags) => cmd.push(flags.iter().cloned()),
            None => cmd.push(cmd::default_c_flags().iter().copied()),
        };
        cmd.push([
            source.to_string_lossy().into_owned(),
            "-o".to_string(),
            output.to_string_lossy().into_owned(),
        ]);
        cmd
    }
}
