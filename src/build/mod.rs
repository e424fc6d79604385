//! Batch driver: compile every source in a directory into its own binary.

mod clean;
mod core;

pub use self::clean::clean;
pub use self::core::{BuildOptions, build_all, collect_sources, output_for};
