//! File and machine-readable output: CSV sheets and JSON.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::core::{
    data::Candidate,
    normalize::InventoryEntry,
    pipeline::ScanReport,
    summary::{FileKindStats, RunSummary},
};

pub const RAW_SHEET: &str = "raw.csv";
pub const CLEANED_SHEET: &str = "cleaned.csv";
pub const INVENTORY_SHEET: &str = "inventory.csv";
pub const FILE_STATS_SHEET: &str = "file_stats.csv";
pub const SUMMARY_SHEET: &str = "summary.csv";

const CANDIDATE_HEADERS: [&str; 6] = [
    "source",
    "schema",
    "origin",
    "table_name",
    "file_name",
    "line",
];

/// Write all five sheets into `dir`, creating it if needed.
///
/// Returns the written paths in sheet order.
pub fn write_sheets(report: &ScanReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let raw = dir.join(RAW_SHEET);
    write_candidates(&mut open(&raw)?, &report.raw)?;

    let cleaned = dir.join(CLEANED_SHEET);
    write_candidates(&mut open(&cleaned)?, &report.cleaned)?;

    let inventory = dir.join(INVENTORY_SHEET);
    write_inventory(&mut open(&inventory)?, &report.inventory)?;

    let file_stats = dir.join(FILE_STATS_SHEET);
    write_file_stats(&mut open(&file_stats)?, &report.summary.file_kinds)?;

    let summary = dir.join(SUMMARY_SHEET);
    write_summary(&mut open(&summary)?, &report.summary)?;

    Ok(vec![raw, cleaned, inventory, file_stats, summary])
}

/// Full report as pretty JSON.
pub fn write_json<W: Write>(report: &ScanReport, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report).context("Failed to serialize report")?;
    writeln!(writer)?;
    Ok(())
}

fn open(path: &Path) -> Result<csv::Writer<fs::File>> {
    csv::Writer::from_path(path).with_context(|| format!("Failed to write {}", path.display()))
}

fn write_candidates<W: Write>(wtr: &mut csv::Writer<W>, candidates: &[Candidate]) -> Result<()> {
    wtr.write_record(CANDIDATE_HEADERS)?;
    for c in candidates {
        let origin = c.origin().map(|o| o.to_string()).unwrap_or_default();
        wtr.write_record([
            c.source.as_str(),
            c.schema(),
            origin.as_str(),
            c.table_name.as_str(),
            c.file_name.as_str(),
            c.line.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_inventory<W: Write>(wtr: &mut csv::Writer<W>, entries: &[InventoryEntry]) -> Result<()> {
    wtr.write_record(["schema", "table_name"])?;
    for entry in entries {
        wtr.write_record([entry.schema.as_str(), entry.table_name.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_file_stats<W: Write>(wtr: &mut csv::Writer<W>, stats: &[FileKindStats]) -> Result<()> {
    wtr.write_record(["file_type", "files", "tables", "average_per_file"])?;
    for row in stats {
        wtr.write_record([
            row.label().to_string(),
            row.files.to_string(),
            row.candidates.to_string(),
            format!("{:.2}", row.average),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_summary<W: Write>(wtr: &mut csv::Writer<W>, summary: &RunSummary) -> Result<()> {
    let losses = &summary.losses;
    let counters = &summary.counters;
    let rows = [
        ("records", "raw", losses.raw),
        ("records", "cleaned", losses.cleaned),
        ("records", "removed_by_cleaning", losses.removed_by_cleaning),
        ("records", "deduplicated", losses.deduplicated),
        ("records", "removed_by_dedup", losses.removed_by_dedup),
        ("files", "discovered", counters.discovered_files),
        ("files", "processed", counters.processed_files),
        ("files", "failed", counters.failed_files),
        ("files", "schema_markers", counters.schema_markers),
    ];

    wtr.write_record(["section", "item", "value"])?;
    for (section, item, value) in rows {
        wtr.write_record([section, item, value.to_string().as_str()])?;
    }
    for (schema, count) in &summary.schemas {
        wtr.write_record(["schema", schema.as_str(), count.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}
