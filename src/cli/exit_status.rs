use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): inventory produced (possibly empty of tables)
/// - `Failure` (1): nothing to scan, or `init` found an existing config
/// - `Error` (2): configuration, glob or output I/O error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// No input files were discovered.
    Failure,
    /// Command failed before producing output.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
