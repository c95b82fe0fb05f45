//! Command-line front end for `finrisk_core`
//!
//! Reads input records from YAML, validates their ranges, runs one engine and
//! returns a record for `main` to print as JSON.

pub mod cli;
pub mod commands;
pub mod input;
pub mod logging;

pub use cli::{Cli, Command};
pub use commands::{Output, run};
pub use logging::init_logging;
