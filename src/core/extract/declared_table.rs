use std::sync::LazyLock;

use regex::Regex;

use super::{Extract, Extraction};
use crate::core::{
    data::{Candidate, Source},
    source::file_name_of,
};

const MARKER: &str = "@TableName";

static NAMED_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@TableName\s*\(\s*value\s*=\s*["']([^"']+)["']"#).unwrap()
});

static BARE_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"@TableName\s*\(\s*["']([^"']+)["']"#).unwrap());

/// Entity tables declared with MyBatis-Plus `@TableName`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredTableExtractor;

impl DeclaredTableExtractor {
    fn table_on_line(line: &str) -> Option<&str> {
        if !line.contains(MARKER) {
            return None;
        }
        NAMED_VALUE_REGEX
            .captures(line)
            .or_else(|| BARE_VALUE_REGEX.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl Extract for DeclaredTableExtractor {
    fn name(&self) -> &'static str {
        "declared-table"
    }

    fn extract(&self, path: &str, text: &str) -> Extraction {
        let file_name = file_name_of(path);
        let mut extraction = Extraction::default();

        for (idx, line) in text.split('\n').enumerate() {
            if let Some(table) = Self::table_on_line(line) {
                extraction.candidates.push(Candidate::new(
                    Source::TableName,
                    table,
                    file_name,
                    idx + 1,
                ));
            }
        }

        extraction
    }
}
