//! Command-line interface layer.
//!
//! ## Module Structure
//!
//! - `args`: clap argument definitions
//! - `commands`: `scan` and `init` handlers
//! - `report`: colored console output
//! - `export`: CSV sheets and JSON
//! - `exit_status`: process exit codes

use anyhow::Result;

pub mod args;
pub mod commands;
pub mod exit_status;
pub mod export;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
