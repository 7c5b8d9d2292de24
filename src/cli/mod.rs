//! CLI layer: argument parsing, command dispatch and terminal output

pub mod args;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

pub use args::{Cli, GrafCli};
pub use error::{CliError, CliResult};
