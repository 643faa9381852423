//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Filesystem utility: query the dirty bit of a volume
///
/// Commands are matched case-insensitively, e.g. `fsutil dirty QUERY c:`.
#[derive(Parser, Debug)]
#[command(name = "fsutil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/fsutil/fsutil.toml)
    #[arg(short, long, env = "FSUTIL_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Command group and its arguments, e.g. `dirty query c:`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub args: Vec<String>,
}
