use std::io;

use anyhow::Result;

use super::super::{
    args::{OutputFormat, ScanCommand},
    exit_status::ExitStatus,
    export::{write_json, write_sheets},
    report::{print_no_files_to, print_read_warning, print_written_to, report},
};
use crate::core::ScanContext;

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = ScanContext::new(args)?;

    if ctx.files.is_empty() {
        print_no_files_to(&ctx.config.source_root, &mut io::stderr().lock());
        return Ok(ExitStatus::Failure);
    }

    let result = ctx.report();
    print_read_warning(result.read_failures.len(), ctx.verbose);

    let written = match args.output {
        Some(ref dir) => write_sheets(result, dir)?,
        None => Vec::new(),
    };

    match args.format {
        OutputFormat::Text => {
            report(result, ctx.verbose);
            print_written_to(&written, &mut io::stdout().lock());
        }
        OutputFormat::Json => {
            write_json(result, &mut io::stdout().lock())?;
            // Keep stdout pure JSON.
            print_written_to(&written, &mut io::stderr().lock());
        }
    }

    Ok(ExitStatus::Success)
}
