//! Cleaning, deduplication and ordering of attributed candidates.

use std::{
    collections::{BTreeSet, HashSet},
    ops::RangeInclusive,
};

use serde::Serialize;

use crate::core::data::{Candidate, RejectReason, RejectedCandidate};

/// Words that are never table names: SQL and Oracle keywords, Java keywords
/// and common library types. Compared ASCII case-insensitively.
pub const RESERVED_KEYWORDS: &[&str] = &[
    // SQL
    "SELECT", "FROM", "WHERE", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "TABLE",
    "VIEW", "INDEX", "TRIGGER", "PROCEDURE", "FUNCTION", "DATABASE", "SCHEMA", "JOIN", "LEFT",
    "RIGHT", "INNER", "OUTER", "ON", "GROUP", "BY", "HAVING", "ORDER", "LIMIT", "OFFSET", "AS",
    "AND", "OR", "NOT", "IN", "LIKE", "BETWEEN", "IS", "NULL", "TRUE", "FALSE", "DISTINCT",
    "UNION", "ALL", "CASE", "WHEN", "THEN", "ELSE", "END",
    // Oracle
    "DUAL", "TO",
    // Java
    "public", "private", "protected", "class", "interface", "extends", "implements", "static",
    "final", "abstract", "synchronized", "volatile", "transient", "native", "package", "import",
    "if", "else", "for", "while", "do", "switch", "case", "default", "break", "continue",
    "return", "try", "catch", "finally", "throw", "throws", "new", "this", "super", "instanceof",
    "typeof", "void", "int", "long", "float", "double", "char", "boolean", "byte", "short",
    "String", "Object", "List", "Map", "Set", "Array", "ArrayList", "HashMap", "HashSet",
];

const CJK_RANGE: RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';

/// Keep ASCII alphanumerics, `_` and `.`.
pub fn filter_table_chars(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .collect()
}

pub fn contains_cjk(raw: &str) -> bool {
    raw.chars().any(|c| CJK_RANGE.contains(&c))
}

fn contains_variable_form(raw: &str) -> bool {
    raw.contains("${") || raw.contains("#{")
}

/// Case-insensitive keyword deny-list.
#[derive(Debug, Clone)]
pub struct DenyList {
    words: HashSet<String>,
}

impl Default for DenyList {
    fn default() -> Self {
        Self::new::<&str>(&[])
    }
}

impl DenyList {
    /// Built-in keywords plus `extra`.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Self {
        let words = RESERVED_KEYWORDS
            .iter()
            .copied()
            .chain(extra.iter().map(|s| s.as_ref()))
            .map(str::to_ascii_uppercase)
            .collect();
        Self { words }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.words.contains(&name.to_ascii_uppercase())
    }
}

/// Reasons `raw` would be rejected, given its cleaned form.
pub fn rejection_reasons(raw: &str, cleaned: &str, deny: &DenyList) -> Vec<RejectReason> {
    let mut reasons = Vec::new();
    if cleaned.is_empty() {
        reasons.push(RejectReason::EmptyName);
    }
    if contains_variable_form(raw) {
        reasons.push(RejectReason::VariableForm);
    }
    if contains_cjk(raw) {
        reasons.push(RejectReason::Cjk);
    }
    if !cleaned.is_empty() && deny.contains(cleaned) {
        reasons.push(RejectReason::Keyword);
    }
    reasons
}

/// Result of the cleaning pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cleaned {
    /// Survivors with cleaned names, in canonical order.
    pub kept: Vec<Candidate>,
    /// Dropped candidates, in input order.
    pub rejected: Vec<RejectedCandidate>,
}

/// Clean every candidate, rewriting survivors to their cleaned names.
pub fn clean(candidates: &[Candidate], deny: &DenyList) -> Cleaned {
    let mut cleaned = Cleaned::default();

    for candidate in candidates {
        let name = filter_table_chars(&candidate.table_name);
        let reasons = rejection_reasons(&candidate.table_name, &name, deny);

        if reasons.is_empty() {
            cleaned.kept.push(candidate.clone().with_table_name(name));
        } else {
            cleaned.rejected.push(RejectedCandidate::new(
                candidate.source,
                candidate.table_name.clone(),
                candidate.file_name.clone(),
                candidate.line,
                reasons,
            ));
        }
    }

    sort_candidates(&mut cleaned.kept);
    cleaned
}

/// Sort by (source, schema, table, file, line).
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(Candidate::report_cmp);
}

/// Keep the first candidate, in canonical order, per (schema, table).
pub fn deduplicate(candidates: &[Candidate]) -> Vec<Candidate> {
    let mut sorted = candidates.to_vec();
    sort_candidates(&mut sorted);

    let mut seen: HashSet<(String, String)> = HashSet::new();
    sorted
        .into_iter()
        .filter(|c| seen.insert((c.schema().to_string(), c.table_name.clone())))
        .collect()
}

/// One unique `(schema, table)` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct InventoryEntry {
    pub schema: String,
    pub table_name: String,
}

/// Unique `(schema, table)` pairs sorted by schema, then table.
pub fn inventory(candidates: &[Candidate]) -> Vec<InventoryEntry> {
    candidates
        .iter()
        .map(|c| InventoryEntry {
            schema: c.schema().to_string(),
            table_name: c.table_name.clone(),
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
