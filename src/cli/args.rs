//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use clap_complete::Shell;

/// Build a prefix expression tree and collapse every subtree worth a single digit
#[derive(Parser, Debug)]
#[command(name = "calctree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File holding one prefix expression, e.g. `+ * 2 3 1`
    #[arg(
        value_hint = ValueHint::FilePath,
        required_unless_present_any = ["completions", "show_config"]
    )]
    pub file: Option<PathBuf>,

    /// Config file layered over the global config
    #[arg(short, long, env = "CALCTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Also print both trees as box-drawing trees
    #[arg(long)]
    pub tree: bool,

    /// Prefix output lines with `original:` and `reduced:`
    #[arg(long)]
    pub labels: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Debug output on stderr: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,
}

/// Cities reachable from both K1 and K2 with at most L roads
#[derive(Parser, Debug)]
#[command(name = "graf7")]
#[command(author, version, about, long_about = None)]
pub struct GrafCli {
    /// City count followed by the adjacency matrix
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// First city, 1-based (prompted for when omitted)
    #[arg(value_name = "K1", requires_all = ["second", "max_hops"])]
    pub first: Option<usize>,

    /// Second city, 1-based
    #[arg(value_name = "K2")]
    pub second: Option<usize>,

    /// Maximum number of roads
    #[arg(value_name = "L")]
    pub max_hops: Option<usize>,

    /// Debug output on stderr: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,
}
