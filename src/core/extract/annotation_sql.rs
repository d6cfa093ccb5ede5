//! SQL bound to mapper methods through `@Select`, `@Insert`, `@Update` and
//! `@Delete`.
//!
//! The SQL text comes either from a string literal inside the annotation or
//! from a constant the annotation names (`@Select(FIND_ALL)`); constants and
//! `${name}` placeholders inside the SQL are resolved through the file's
//! [`VariableTable`].

use std::{cell::OnceCell, sync::LazyLock};

use regex::Regex;

use super::{Extract, Extraction, VariableTable, keyword};
use crate::core::{
    data::{Candidate, Source},
    source::file_name_of,
};

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

static INSERT_INTO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)INTO\s+([\w.]+)").unwrap());

/// Patterns for one annotation kind.
struct AnnotationPatterns {
    marker: &'static str,
    source: Source,
    /// Literal forms, tried in order.
    literals: [Regex; 4],
    /// `@X(anything)` for constant references.
    reference: Regex,
}

impl AnnotationPatterns {
    fn new(marker: &'static str, source: Source) -> Self {
        let literal = |body: &str| Regex::new(&format!(r"{}\s*\(\s*{}", marker, body)).unwrap();
        Self {
            marker,
            source,
            literals: [
                literal(r#"["']([^"']*)["']"#),
                literal(r#"value\s*=\s*["']([^"']*)["']"#),
                literal(r#""([^"]*)""#),
                literal(r"'([^']*)'"),
            ],
            reference: Regex::new(&format!(r"{}\s*\(\s*([^)]+)\)", marker)).unwrap(),
        }
    }

    /// First literal form that matches, possibly empty.
    fn literal_sql<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.literals
            .iter()
            .find_map(|re| re.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn reference<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.reference
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

static ANNOTATIONS: LazyLock<[AnnotationPatterns; 4]> = LazyLock::new(|| {
    [
        AnnotationPatterns::new("@Select", Source::Select),
        AnnotationPatterns::new("@Insert", Source::Insert),
        AnnotationPatterns::new("@Update", Source::Update),
        AnnotationPatterns::new("@Delete", Source::Delete),
    ]
});

/// Tables referenced by MyBatis SQL annotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationSqlExtractor;

impl AnnotationSqlExtractor {
    fn extract_sql(
        annotation: &AnnotationPatterns,
        sql: &str,
        variables: &VariableTable,
        file_name: &str,
        line_no: usize,
        extraction: &mut Extraction,
    ) {
        let source = annotation.source;

        for found in keyword::scan(sql) {
            extraction.record(source, file_name, line_no, found);
        }

        for caps in PLACEHOLDER_REGEX.captures_iter(sql) {
            if let Some(table) = variables.get(&caps[1]) {
                extraction
                    .candidates
                    .push(Candidate::new(source, table, file_name, line_no));
            }
        }

        if source == Source::Insert && sql.contains("INTO") {
            for caps in INSERT_INTO_REGEX.captures_iter(sql) {
                let table = &caps[1];
                if !keyword::is_placeholder(table) {
                    extraction
                        .candidates
                        .push(Candidate::new(source, table, file_name, line_no));
                }
            }
        }
    }
}

impl Extract for AnnotationSqlExtractor {
    fn name(&self) -> &'static str {
        "annotation-sql"
    }

    fn extract(&self, path: &str, text: &str) -> Extraction {
        let file_name = file_name_of(path);
        let mut extraction = Extraction::default();
        let table: OnceCell<VariableTable> = OnceCell::new();
        let variables = || table.get_or_init(|| VariableTable::from_text(text));

        for (idx, line) in text.split('\n').enumerate() {
            for annotation in ANNOTATIONS.iter() {
                if !line.contains(annotation.marker) {
                    continue;
                }

                let sql = match annotation.literal_sql(line) {
                    Some(sql) if !sql.is_empty() => Some(sql),
                    _ => annotation
                        .reference(line)
                        .and_then(|arg| variables().resolve_reference(arg)),
                };

                if let Some(sql) = sql {
                    Self::extract_sql(
                        annotation,
                        sql,
                        variables(),
                        file_name,
                        idx + 1,
                        &mut extraction,
                    );
                }
            }
        }

        extraction
    }
}
