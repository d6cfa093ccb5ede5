//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Inventory table references under a source tree
//! - `init`: Write a default `.tablescanrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Arguments shared by commands that read a source tree.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored summary and inventory table
    #[default]
    Text,
    /// Full report as JSON on stdout
    Json,
}

#[derive(Debug, Clone, Default, Parser)]
pub struct ScanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory to write the CSV sheets to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Console output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Do not guess schemas from table-name hashes
    #[arg(long)]
    pub no_guess: bool,

    /// Schema for tables nothing else attributes (overrides config file)
    #[arg(long)]
    pub default_schema: Option<String>,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub args: ScanArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan Java sources and mapper XML for referenced database tables
    Scan(ScanCommand),
    /// Initialize a new .tablescanrc.json configuration file
    Init,
}
