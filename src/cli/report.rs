//! Console rendering of a scan.
//!
//! Separate from the pipeline so the engine can be used as a library.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{
    data::Source,
    normalize::InventoryEntry,
    pipeline::ScanReport,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const INDENT: &str = "  ";

/// Print the run summary and inventory table to stdout.
pub fn report(report: &ScanReport, verbose: bool) {
    report_to(report, verbose, &mut io::stdout().lock());
}

/// Print the run summary and inventory table to a custom writer.
pub fn report_to<W: Write>(report: &ScanReport, verbose: bool, writer: &mut W) {
    print_files(report, writer);
    print_hits(report, writer);
    print_losses(report, writer);
    if verbose {
        print_rejections(report, writer);
    }
    print_schemas(report, writer);
    print_inventory(&report.inventory, writer);
    print_result_line(report, writer);
}

/// Print a warning about files that could not be read.
pub fn print_read_warning(count: usize, verbose: bool) {
    print_read_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_read_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Print a warning when discovery found nothing.
pub fn print_no_files_to<W: Write>(source_root: &str, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} No .java or .xml files found under {}",
        "warning:".bold().yellow(),
        source_root
    );
}

/// List written output files.
pub fn print_written_to<W: Write>(paths: &[PathBuf], writer: &mut W) {
    for path in paths {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Wrote {}", path.display()).green()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn heading<W: Write>(title: &str, writer: &mut W) {
    let _ = writeln!(writer, "{}", title.bold());
}

fn print_files<W: Write>(report: &ScanReport, writer: &mut W) {
    let counters = &report.summary.counters;
    let _ = write!(
        writer,
        "Scanned {} {}",
        counters.processed_files,
        if counters.processed_files == 1 {
            "file"
        } else {
            "files"
        }
    );
    if counters.failed_files > 0 {
        let _ = write!(
            writer,
            " ({} {})",
            counters.failed_files,
            "unreadable".yellow()
        );
    }
    let _ = writeln!(
        writer,
        ", {} @DS {}",
        counters.schema_markers,
        if counters.schema_markers == 1 {
            "marker"
        } else {
            "markers"
        }
    );
}

fn print_hits<W: Write>(report: &ScanReport, writer: &mut W) {
    let stats = &report.stats;
    let width = Source::ALL
        .iter()
        .map(|s| UnicodeWidthStr::width(s.as_str()))
        .max()
        .unwrap_or(0);

    heading("\nExtraction hits", writer);
    for source in Source::ALL {
        let _ = writeln!(
            writer,
            "{}{:<width$}  {}",
            INDENT,
            source.as_str(),
            stats.hits(source),
            width = width
        );
    }
    let _ = writeln!(
        writer,
        "{}{:<width$}  {}",
        INDENT,
        "annotations",
        stats.annotation_total(),
        width = width
    );
}

fn print_losses<W: Write>(report: &ScanReport, writer: &mut W) {
    let losses = &report.summary.losses;
    heading("\nNormalization", writer);
    let _ = writeln!(
        writer,
        "{}{} raw, {} cleaned ({} removed), {} unique ({} duplicates)",
        INDENT,
        losses.raw,
        losses.cleaned,
        losses.removed_by_cleaning,
        losses.deduplicated,
        losses.removed_by_dedup
    );
}

fn print_rejections<W: Write>(report: &ScanReport, writer: &mut W) {
    let stats = &report.stats;
    if stats.rejected_total == 0 {
        return;
    }
    heading("\nRejected matches", writer);
    for (reason, count) in &stats.rejected_by_reason {
        let _ = writeln!(writer, "{}{}: {}", INDENT, reason, count);
    }
    for rejected in &report.rejected {
        let reasons: Vec<String> = rejected.reasons.iter().map(|r| r.to_string()).collect();
        let _ = writeln!(
            writer,
            "{}{} {}:{} \"{}\" ({})",
            INDENT,
            "-".dimmed(),
            rejected.file_name,
            rejected.line,
            rejected.table_name,
            reasons.join(", ")
        );
    }
}

fn print_schemas<W: Write>(report: &ScanReport, writer: &mut W) {
    let schemas = &report.summary.schemas;
    if schemas.is_empty() {
        return;
    }
    let width = schemas
        .keys()
        .map(|s| UnicodeWidthStr::width(s.as_str()))
        .max()
        .unwrap_or(0);

    heading("\nSchemas", writer);
    for (schema, count) in schemas {
        let _ = writeln!(
            writer,
            "{}{}  {}",
            INDENT,
            pad(schema, width).cyan(),
            count
        );
    }
}

fn print_inventory<W: Write>(entries: &[InventoryEntry], writer: &mut W) {
    if entries.is_empty() {
        return;
    }
    let width = entries
        .iter()
        .map(|e| UnicodeWidthStr::width(e.schema.as_str()))
        .chain(std::iter::once(UnicodeWidthStr::width("SCHEMA")))
        .max()
        .unwrap_or(0);

    let _ = writeln!(writer);
    let _ = writeln!(
        writer,
        "{}{}  {}",
        INDENT,
        pad("SCHEMA", width).bold(),
        "TABLE".bold()
    );
    for entry in entries {
        let _ = writeln!(
            writer,
            "{}{}  {}",
            INDENT,
            pad(&entry.schema, width).cyan(),
            entry.table_name
        );
    }
}

fn print_result_line<W: Write>(report: &ScanReport, writer: &mut W) {
    let tables = report.inventory.len();
    let schemas = report.summary.schemas.len();
    let line = if tables == 0 {
        format!("{} {}", FAILURE_MARK.yellow(), "No table references found".yellow())
    } else {
        format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Found {} {} in {} {}",
                tables,
                if tables == 1 { "table" } else { "tables" },
                schemas,
                if schemas == 1 { "schema" } else { "schemas" }
            )
            .green()
        )
    };
    let _ = writeln!(writer, "\n{}", line);
}

/// Left-align to a display width, so CJK schema labels line up.
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}
