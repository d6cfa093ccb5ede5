use std::fmt;

use serde::Serialize;

use super::Source;

/// Why a would-be table name was dropped.
///
/// Reasons are independent flags: one rejection may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    EmptyName,
    VariableForm,
    Cjk,
    Keyword,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::EmptyName => write!(f, "empty table name"),
            RejectReason::VariableForm => write!(f, "contains variable form"),
            RejectReason::Cjk => write!(f, "contains CJK characters"),
            RejectReason::Keyword => write!(f, "reserved keyword"),
        }
    }
}

/// A match kept for diagnostics instead of becoming a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedCandidate {
    pub source: Source,
    pub table_name: String,
    pub file_name: String,
    pub line: usize,
    pub reasons: Vec<RejectReason>,
}

impl RejectedCandidate {
    pub fn new(
        source: Source,
        table_name: impl Into<String>,
        file_name: impl Into<String>,
        line: usize,
        reasons: Vec<RejectReason>,
    ) -> Self {
        Self {
            source,
            table_name: table_name.into(),
            file_name: file_name.into(),
            line,
            reasons,
        }
    }

    pub fn has_reason(&self, reason: RejectReason) -> bool {
        self.reasons.contains(&reason)
    }
}
