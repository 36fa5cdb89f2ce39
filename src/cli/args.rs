//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Audit data-model classes across a Python codebase
///
/// The command surface is one positional argument; missing or surplus
/// arguments terminate with a usage message before any analysis starts.
#[derive(Parser, Debug)]
#[command(name = "schemalens")]
#[command(about = "Audit data-model classes across a Python codebase for naming inconsistencies")]
#[command(version)]
pub struct Args {
    /// Root directory containing the model sources
    pub path: PathBuf,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
