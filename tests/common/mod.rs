//! Helpers shared by the integration tests.

#![allow(dead_code)]

use nobuild::{Cmd, Launcher, SystemLauncher};
use std::cell::Cell;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::process::{Child, Command};
use std::time::{Duration, SystemTime};

/// Spy around the real launcher: counts how many processes were started.
#[derive(Default)]
pub struct CountingLauncher {
    pub calls: Cell<usize>,
}

impl Launcher for CountingLauncher {
    fn launch(&self, cmd: &Cmd) -> io::Result<Child> {
        self.calls.set(self.calls.get() + 1);
        SystemLauncher.launch(cmd)
    }
}

pub fn c_compiler_available() -> bool {
    Command::new("cc")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

pub fn touch(path: &Path, at: SystemTime) {
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

pub fn base_time() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

pub const HELLO_C: &str = r#"#include <stdio.h>
int main(void) {
    printf("Hello from test!\n");
    return 0;
}
"#;

pub const BROKEN_C: &str = "int main(void) { return undefined_symbol; }\n";
