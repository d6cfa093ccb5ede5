//! Aggregate counts shown on the console and in the summary sheets.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::core::{data::Candidate, source::FileKind};

/// Candidates per file kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileKindStats {
    pub kind: FileKind,
    /// Distinct files that produced at least one candidate.
    pub files: usize,
    pub candidates: usize,
    /// Candidates per file, rounded to two decimals.
    pub average: f64,
}

impl FileKindStats {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// How many candidates each stage kept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LossCounts {
    pub raw: usize,
    pub cleaned: usize,
    pub removed_by_cleaning: usize,
    pub deduplicated: usize,
    pub removed_by_dedup: usize,
}

impl LossCounts {
    pub fn new(raw: usize, cleaned: usize, deduplicated: usize) -> Self {
        Self {
            raw,
            cleaned,
            removed_by_cleaning: raw.saturating_sub(cleaned),
            deduplicated,
            removed_by_dedup: cleaned.saturating_sub(deduplicated),
        }
    }
}

/// File and marker counters for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCounters {
    pub discovered_files: usize,
    pub processed_files: usize,
    pub failed_files: usize,
    pub schema_markers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub counters: RunCounters,
    pub losses: LossCounts,
    /// Tables per schema over the deduplicated list.
    pub schemas: BTreeMap<String, usize>,
    /// One row per kind, always in `Java`, `XML`, `Other` order.
    pub file_kinds: Vec<FileKindStats>,
}

impl RunSummary {
    pub fn new(
        counters: RunCounters,
        raw: &[Candidate],
        cleaned: &[Candidate],
        deduplicated: &[Candidate],
    ) -> Self {
        let mut schemas = BTreeMap::new();
        for candidate in deduplicated {
            *schemas.entry(candidate.schema().to_string()).or_insert(0) += 1;
        }

        Self {
            counters,
            losses: LossCounts::new(raw.len(), cleaned.len(), deduplicated.len()),
            schemas,
            file_kinds: file_kind_stats(raw),
        }
    }

    pub fn total_tables(&self) -> usize {
        self.schemas.values().sum()
    }
}

/// Per-kind statistics keyed on each candidate's file extension.
pub fn file_kind_stats(candidates: &[Candidate]) -> Vec<FileKindStats> {
    [FileKind::Source, FileKind::Xml, FileKind::Other]
        .into_iter()
        .map(|kind| {
            let matching: Vec<&Candidate> = candidates
                .iter()
                .filter(|c| FileKind::from_path(&c.file_name) == kind)
                .collect();
            let files = matching
                .iter()
                .map(|c| c.file_name.as_str())
                .collect::<BTreeSet<_>>()
                .len();
            let average = if files == 0 {
                0.0
            } else {
                round2(matching.len() as f64 / files as f64)
            };
            FileKindStats {
                kind,
                files,
                candidates: matching.len(),
                average,
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
