//! Keyword-driven table extraction shared by the SQL-scanning extractors.
//!
//! A table reference is the token right after one of `FROM`, `JOIN`, `INTO`,
//! `UPDATE` or `TABLE`. Each keyword is searched separately so that
//! `UPDATE TABLE foo` yields both `TABLE` (later dropped by cleaning) and `foo`.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::data::RejectReason;

/// Keywords that precede a table name in SQL.
pub const TABLE_KEYWORDS: [&str; 5] = ["FROM", "JOIN", "INTO", "UPDATE", "TABLE"];

/// Statement verbs used to recognise SQL inside string literals.
pub const STATEMENT_KEYWORDS: [&str; 4] = ["SELECT", "INSERT", "UPDATE", "DELETE"];

/// Token after a keyword: a `${..}` / `#{..}` placeholder form, or a dotted
/// identifier that may have spaces around its dots.
const TABLE_TOKEN: &str = r"([$#]\{[^}]*\}[\w.]*|[\w.]+(?:\s*\.\w+)*)";

static KEYWORD_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TABLE_KEYWORDS
        .iter()
        .map(|kw| Regex::new(&format!(r"(?i)\b{}\b\s+{}", kw, TABLE_TOKEN)).unwrap())
        .collect()
});

/// Outcome of one keyword occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordMatch {
    Table(String),
    Rejected {
        raw: String,
        reasons: Vec<RejectReason>,
    },
}

/// True when the text starts with a template placeholder.
pub fn is_placeholder(name: &str) -> bool {
    name.starts_with("${") || name.starts_with("#{")
}

/// Evaluate every keyword occurrence in `text`.
///
/// Matches are returned grouped by keyword in [`TABLE_KEYWORDS`] order, then
/// by position.
pub fn scan(text: &str) -> Vec<KeywordMatch> {
    let mut matches = Vec::new();

    for pattern in KEYWORD_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let raw = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            matches.push(classify(raw));
        }
    }

    matches
}

fn classify(raw: &str) -> KeywordMatch {
    if raw.is_empty() {
        KeywordMatch::Rejected {
            raw: String::new(),
            reasons: vec![RejectReason::EmptyName],
        }
    } else if is_placeholder(raw) {
        KeywordMatch::Rejected {
            raw: raw.to_string(),
            reasons: vec![RejectReason::VariableForm],
        }
    } else {
        KeywordMatch::Table(raw.to_string())
    }
}

/// Cheap pre-check for a source line worth running [`scan`] on.
///
/// True when the line contains a table keyword anywhere, or a double quote
/// together with a statement verb.
pub fn looks_like_sql(line: &str) -> bool {
    let upper = line.to_uppercase();
    if TABLE_KEYWORDS.iter().any(|kw| upper.contains(kw)) {
        return true;
    }
    line.contains('"') && STATEMENT_KEYWORDS.iter().any(|kw| upper.contains(kw))
}
