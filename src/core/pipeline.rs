//! Extraction → attribution → normalization over a loaded file set.
//!
//! Stages hand values to each other; no stage mutates another's output.

use serde::Serialize;

use crate::core::{
    data::{Candidate, RejectedCandidate},
    extract::{Coordinator, ExtractionStats},
    normalize::{self, DenyList, InventoryEntry},
    schema::{SchemaAttributor, SchemaIndex, SchemaOptions},
    source::{LoadResult, ReadFailure},
    summary::{RunCounters, RunSummary},
};

/// Everything a renderer needs from one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Attributed candidates before cleaning, in canonical order.
    pub raw: Vec<Candidate>,
    /// Cleaned candidates, in canonical order.
    pub cleaned: Vec<Candidate>,
    /// One candidate per (schema, table), in canonical order.
    pub deduplicated: Vec<Candidate>,
    pub inventory: Vec<InventoryEntry>,
    /// Matches dropped during extraction, then candidates dropped by cleaning.
    pub rejected: Vec<RejectedCandidate>,
    /// Hits over raw candidates; reasons over the whole rejection log.
    pub stats: ExtractionStats,
    pub summary: RunSummary,
    pub read_failures: Vec<ReadFailure>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }
}

/// Configured stage chain.
pub struct Pipeline {
    coordinator: Coordinator,
    schema: SchemaOptions,
    deny: DenyList,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(SchemaOptions::default(), DenyList::default())
    }
}

impl Pipeline {
    pub fn new(schema: SchemaOptions, deny: DenyList) -> Self {
        Self {
            coordinator: Coordinator::default(),
            schema,
            deny,
        }
    }

    /// Run every stage over `loaded`.
    ///
    /// `discovered` is the number of paths handed to the reader, so that the
    /// summary can report files that failed to load.
    pub fn run(&self, loaded: &LoadResult, discovered: usize) -> ScanReport {
        let extraction = self.coordinator.extract_all(&loaded.files);

        // The index must be complete before any candidate is labeled.
        let index = SchemaIndex::build(&loaded.files);
        let attributor = SchemaAttributor::new(&index, &self.schema);
        let mut raw = attributor.attribute(&extraction.candidates);
        normalize::sort_candidates(&mut raw);

        let cleaned = normalize::clean(&raw, &self.deny);
        let deduplicated = normalize::deduplicate(&cleaned.kept);
        let inventory = normalize::inventory(&deduplicated);

        let mut rejected = extraction.rejected;
        rejected.extend(cleaned.rejected);
        let stats = ExtractionStats::from_results(&raw, &rejected);

        let counters = RunCounters {
            discovered_files: discovered,
            processed_files: loaded.files.len(),
            failed_files: loaded.failures.len(),
            schema_markers: index.marker_count(),
        };
        let summary = RunSummary::new(counters, &raw, &cleaned.kept, &deduplicated);

        ScanReport {
            raw,
            cleaned: cleaned.kept,
            deduplicated,
            inventory,
            rejected,
            stats,
            summary,
            read_failures: loaded.failures.clone(),
        }
    }
}
