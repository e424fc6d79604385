//! Leveled terminal logger.
//!
//! The logger is an explicit context object: whoever needs to report
//! something borrows a [`Logger`] instead of touching process-wide state.
//! Output goes to stderr unless a different sink is installed.
//!
//! ```text
//! [CMD] 2025-10-02 14:03:11 >>> cc -Wall -Wextra main.c -o main
//! [ERROR] 2025-10-02 14:03:12 >>> main.c failed with exit code 1
//! ```

use console::{StyledObject, style};
use serde::Deserialize;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Extended diagnostics (staleness decisions, skips)
    Debug,
    #[default]
    Info,
    /// Echo of an executed command line
    Cmd,
    /// A suggestion, nothing is wrong
    Hint,
    Warn,
    /// Recoverable failure; the caller gets `false` or an `Err`
    Error,
    /// Unrecoverable; the process exits after printing
    Fatal,
    /// Print nothing
    None,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Cmd => "CMD",
            Level::Hint => "HINT",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::None => "NONE",
        }
    }

    /// Styled regardless of what the terminal reports; the logger decides.
    fn paint(self, tag: &str) -> StyledObject<&str> {
        let tag = style(tag).force_styling(true);
        match self {
            Level::Debug => tag.dim(),
            Level::Info => tag.green(),
            Level::Cmd => tag.cyan(),
            Level::Hint => tag.blue(),
            Level::Warn => tag.yellow(),
            Level::Error => tag.red(),
            Level::Fatal => tag.magenta().bold(),
            Level::None => tag,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Logger {
    level: Level,
    color: bool,
    time: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("color", &self.color)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Logger writing to stderr, colored if the terminal supports it.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            color: console::Term::stderr().features().colors_supported(),
            time: true,
            sink: Mutex::new(Box::new(io::stderr())),
        }
    }

    /// Logger that drops everything. Useful for tests and embedding.
    pub fn silent() -> Self {
        Self::new(Level::None).with_sink(io::sink())
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_time(mut self, time: bool) -> Self {
        self.time = time;
        self
    }

    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Mutex::new(Box::new(sink));
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether level tags are colored.
    pub fn color(&self) -> bool {
        self.color
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level && level != Level::None
    }

    pub fn log(&self, level: Level, msg: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }

        let tag = format!("[{}]", level.as_str());
        let tag = if self.color {
            level.paint(&tag).to_string()
        } else {
            tag
        };

        let line = if self.time {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            format!("{} {} >>> {}\n", tag, now, msg)
        } else {
            format!("{} {}\n", tag, msg)
        };

        // A poisoned sink still holds a usable writer
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let _ = sink.write_all(line.as_bytes());
        let _ = sink.flush();
    }

    pub fn debug(&self, msg: impl fmt::Display) {
        self.log(Level::Debug, msg);
    }

    pub fn info(&self, msg: impl fmt::Display) {
        self.log(Level::Info, msg);
    }

    pub fn cmd(&self, msg: impl fmt::Display) {
        self.log(Level::Cmd, msg);
    }

    pub fn hint(&self, msg: impl fmt::Display) {
        self.log(Level::Hint, msg);
    }

    pub fn warn(&self, msg: impl fmt::Display) {
        self.log(Level::Warn, msg);
    }

    pub fn error(&self, msg: impl fmt::Display) {
        self.log(Level::Error, msg);
    }

    /// Logs at fatal severity and terminates the process with status 1.
    ///
    /// Only for configuration errors that leave nothing sensible to do, such
    /// as a failed self-rebuild. The fatal line is printed even when the
    /// logger is otherwise silenced.
    pub fn fatal(&self, msg: impl fmt::Display) -> ! {
        if self.enabled(Level::Fatal) {
            self.log(Level::Fatal, msg);
        } else {
            eprintln!("[{}] {}", Level::Fatal, msg);
        }
        std::process::exit(1);
    }
}
