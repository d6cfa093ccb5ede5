use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, scan::scan},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
///
/// Returns `Err` only for fatal problems (bad config, unwritable output);
/// "nothing to scan" is reported through [`ExitStatus::Failure`].
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
