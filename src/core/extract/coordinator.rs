use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use super::{
    AnnotationSqlExtractor, DeclaredTableExtractor, EmbeddedSqlExtractor, Extract, Extraction,
    Extractor, MapperXmlExtractor,
};
use crate::core::{
    data::{Candidate, RejectReason, RejectedCandidate, Source},
    source::{FileKind, SourceFile},
};

/// Hit and rejection counts for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Candidates per source tag.
    pub hits: BTreeMap<Source, usize>,
    /// Rejections per reason. A rejection with two reasons counts twice.
    pub rejected_by_reason: BTreeMap<RejectReason, usize>,
    /// Number of rejected matches.
    pub rejected_total: usize,
}

impl ExtractionStats {
    pub fn from_results(candidates: &[Candidate], rejected: &[RejectedCandidate]) -> Self {
        let mut stats = Self::default();
        for candidate in candidates {
            *stats.hits.entry(candidate.source).or_insert(0) += 1;
        }
        for rejection in rejected {
            for reason in &rejection.reasons {
                *stats.rejected_by_reason.entry(*reason).or_insert(0) += 1;
            }
        }
        stats.rejected_total = rejected.len();
        stats
    }

    pub fn hits(&self, source: Source) -> usize {
        self.hits.get(&source).copied().unwrap_or(0)
    }

    /// `@TableName` plus the four SQL annotations.
    pub fn annotation_total(&self) -> usize {
        self.hits
            .iter()
            .filter(|(source, _)| source.is_annotation())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn total(&self) -> usize {
        self.hits.values().sum()
    }
}

/// Merged extraction output for a set of files.
#[derive(Debug, Default, Clone)]
pub struct ExtractionOutcome {
    pub candidates: Vec<Candidate>,
    pub rejected: Vec<RejectedCandidate>,
    pub stats: ExtractionStats,
}

/// Routes files to extractors by kind and merges their output.
///
/// The coordinator makes no acceptance decisions of its own.
#[derive(Debug, Clone)]
pub struct Coordinator {
    xml: Vec<Extractor>,
    source: Vec<Extractor>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self {
            xml: vec![MapperXmlExtractor.into()],
            source: vec![
                DeclaredTableExtractor.into(),
                AnnotationSqlExtractor.into(),
                EmbeddedSqlExtractor.into(),
            ],
        }
    }
}

impl Coordinator {
    pub fn extractors_for(&self, kind: FileKind) -> &[Extractor] {
        match kind {
            FileKind::Xml => &self.xml,
            FileKind::Source => &self.source,
            FileKind::Other => &[],
        }
    }

    /// Run every applicable extractor on one file, in routing order.
    pub fn extract_file(&self, file: &SourceFile) -> Extraction {
        let mut extraction = Extraction::default();
        for extractor in self.extractors_for(file.kind) {
            extraction.append(extractor.extract(&file.path, &file.text));
        }
        extraction
    }

    /// Extract from all files in parallel.
    ///
    /// Per-file results are merged in input order after the join, so the
    /// output does not depend on scheduling.
    pub fn extract_all(&self, files: &[SourceFile]) -> ExtractionOutcome {
        let per_file: Vec<Extraction> = files.par_iter().map(|f| self.extract_file(f)).collect();

        let mut merged = Extraction::default();
        for extraction in per_file {
            merged.append(extraction);
        }

        let stats = ExtractionStats::from_results(&merged.candidates, &merged.rejected);
        ExtractionOutcome {
            candidates: merged.candidates,
            rejected: merged.rejected,
            stats,
        }
    }
}
