//! Extraction: per-file table candidates.
//!
//! Each extractor is a pure function of `(path, text)`. It returns accepted
//! candidates and a log of rejected matches; it never fails, since a line
//! that yields nothing simply contributes nothing.
//!
//! ## Module Structure
//!
//! - `keyword`: shared FROM/JOIN/INTO/UPDATE/TABLE rule
//! - `variables`: whole-file `name = "value"` table
//! - `mapper_xml`, `declared_table`, `annotation_sql`, `embedded_sql`: extractors
//! - `coordinator`: routing by file kind and run statistics

pub mod annotation_sql;
pub mod coordinator;
pub mod declared_table;
pub mod embedded_sql;
pub mod keyword;
pub mod mapper_xml;
pub mod variables;

use enum_dispatch::enum_dispatch;

pub use annotation_sql::AnnotationSqlExtractor;
pub use coordinator::{Coordinator, ExtractionOutcome, ExtractionStats};
pub use declared_table::DeclaredTableExtractor;
pub use embedded_sql::EmbeddedSqlExtractor;
pub use keyword::KeywordMatch;
pub use mapper_xml::MapperXmlExtractor;
pub use variables::VariableTable;

use crate::core::data::{Candidate, RejectedCandidate, Source};

/// Candidates and rejections produced from one file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub candidates: Vec<Candidate>,
    pub rejected: Vec<RejectedCandidate>,
}

impl Extraction {
    /// Store a keyword match as a candidate or a rejection.
    pub fn record(&mut self, source: Source, file_name: &str, line: usize, found: KeywordMatch) {
        match found {
            KeywordMatch::Table(table) => self
                .candidates
                .push(Candidate::new(source, table, file_name, line)),
            KeywordMatch::Rejected { raw, reasons } => self.rejected.push(
                RejectedCandidate::new(source, raw, file_name, line, reasons),
            ),
        }
    }

    pub fn append(&mut self, mut other: Extraction) {
        self.candidates.append(&mut other.candidates);
        self.rejected.append(&mut other.rejected);
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() && self.rejected.is_empty()
    }
}

/// A table-reference extraction strategy.
#[enum_dispatch]
pub trait Extract {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    fn extract(&self, path: &str, text: &str) -> Extraction;
}

/// All extraction strategies, dispatched without boxing.
#[enum_dispatch(Extract)]
#[derive(Debug, Clone)]
pub enum Extractor {
    MapperXml(MapperXmlExtractor),
    DeclaredTable(DeclaredTableExtractor),
    AnnotationSql(AnnotationSqlExtractor),
    EmbeddedSql(EmbeddedSqlExtractor),
}
