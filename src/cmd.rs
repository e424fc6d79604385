//! Command lines as data.
//!
//! A [`Cmd`] is an argv-style list: the first element is the program, the
//! rest are handed to it verbatim with no shell in between. Build commands
//! follow the `[compiler, flags..., source, "-o", output, ...]` convention,
//! which lets the executor find out what a command reads and writes.

use crate::error::CmdError;
use crate::fs::filename_no_ext;
use std::fmt;
use std::path::Path;

/// Capacity of the first allocation; later growth doubles it.
pub const INIT_CAP: usize = 8;

/// Inputs of the C compiler family: C, C++, Objective-C and assembly.
pub const C_SOURCE_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "c++", "m", "mm", "s", "S"];

/// The part of [`C_SOURCE_EXTENSIONS`] handed to the C++ driver.
pub const CXX_SOURCE_EXTENSIONS: &[&str] = &["cc", "cpp", "cxx", "c++", "mm"];

/// Whether `path` has one of the [`C_SOURCE_EXTENSIONS`].
pub fn is_c_family(path: &Path) -> bool {
    has_extension(path, C_SOURCE_EXTENSIONS)
}

/// Whether `path` should be compiled with the C++ driver.
pub fn is_cxx(path: &Path) -> bool {
    has_extension(path, CXX_SOURCE_EXTENSIONS)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cmd {
    args: Vec<String>,
    is_async: bool,
}

/// Source and output of a build command, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    pub source: &'a str,
    pub output: &'a str,
}

impl Cmd {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every item of `args`, in order.
    pub fn push<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let iter = args.into_iter();
        let (lower, _) = iter.size_hint();
        self.grow(self.args.len() + lower);
        for arg in iter {
            self.grow(self.args.len() + 1);
            self.args.push(arg.into());
        }
        self
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.push([arg])
    }

    fn grow(&mut self, needed: usize) {
        let cap = self.args.capacity();
        if needed <= cap {
            return;
        }
        let mut new_cap = if cap == 0 { INIT_CAP } else { cap };
        while new_cap < needed {
            new_cap *= 2;
        }
        self.args.reserve_exact(new_cap - self.args.len());
    }

    /// Frees the backing storage. The command can be refilled afterwards.
    pub fn release(&mut self) {
        self.args = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.args.capacity()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Marks the command for submission into a process pool.
    pub fn set_async(&mut self, is_async: bool) -> &mut Self {
        self.is_async = is_async;
        self
    }

    pub fn is_async(&self) -> bool {
        self.is_async
    }

    fn output_flag(&self) -> Option<usize> {
        self.args.iter().position(|a| a == "-o")
    }

    /// The argument following the first `-o`.
    pub fn output(&self) -> Option<&str> {
        let idx = self.output_flag()?;
        self.args.get(idx + 1).map(String::as_str)
    }

    /// The first source file between the program and `-o`.
    pub fn source(&self) -> Option<&str> {
        let idx = self.output_flag()?;
        self.args
            .get(1..idx)?
            .iter()
            .map(String::as_str)
            .find(|a| looks_like_source(a))
    }

    pub fn infer(&self) -> Result<Target<'_>, CmdError> {
        if self.args.is_empty() {
            return Err(CmdError::Empty);
        }
        let output = self
            .output()
            .ok_or_else(|| CmdError::MissingOutput(self.to_string()))?;
        let source = self
            .source()
            .ok_or_else(|| CmdError::MissingSource(self.to_string()))?;
        Ok(Target { source, output })
    }

    /// `cc -Wall -Wextra <source> -o <output>` (`gcc <source> -o <output>` on Windows).
    ///
    /// `CC` overrides the compiler. Without an explicit output the binary is
    /// named after the source file, extension stripped.
    pub fn default_c_build(source: &str, output: Option<&str>) -> Self {
        let compiler = std::env::var("CC").unwrap_or_else(|_| default_c_compiler().to_string());
        let mut cmd = Cmd::new();
        cmd.arg(compiler);
        cmd.push(default_c_flags().iter().copied());
        cmd.push([source, "-o"]);
        match output {
            Some(out) => cmd.arg(out),
            None => cmd.arg(filename_no_ext(source)),
        };
        cmd
    }
}

fn looks_like_source(arg: &str) -> bool {
    if arg.starts_with('-') {
        return false;
    }
    let path = Path::new(arg);
    is_c_family(path) || has_extension(path, &["rs"])
}

pub fn default_c_compiler() -> &'static str {
    if cfg!(windows) { "gcc" } else { "cc" }
}

pub fn default_cxx_compiler() -> &'static str {
    if cfg!(windows) { "g++" } else { "c++" }
}

pub fn default_c_flags() -> &'static [&'static str] {
    if cfg!(windows) {
        &[]
    } else {
        &["-Wall", "-Wextra"]
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args.join(" "))
    }
}

impl<S: Into<String>> FromIterator<S> for Cmd {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut cmd = Cmd::new();
        cmd.push(iter);
        cmd
    }
}

impl<S: Into<String>> Extend<S> for Cmd {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.push(iter);
    }
}
