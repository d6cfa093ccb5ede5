use super::{Extract, Extraction, keyword};
use crate::core::{data::Source, source::file_name_of};

/// SQL embedded directly in Java source, e.g. JDBC strings or query builders.
///
/// Only lines that pass [`keyword::looks_like_sql`] are scanned.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSqlExtractor;

impl Extract for EmbeddedSqlExtractor {
    fn name(&self) -> &'static str {
        "embedded-sql"
    }

    fn extract(&self, path: &str, text: &str) -> Extraction {
        let file_name = file_name_of(path);
        let mut extraction = Extraction::default();

        for (idx, line) in text.split('\n').enumerate() {
            if !keyword::looks_like_sql(line) {
                continue;
            }
            for found in keyword::scan(line) {
                extraction.record(Source::EmbeddedSql, file_name, idx + 1, found);
            }
        }

        extraction
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::data::RejectReason;

    #[test]
    fn test_jdbc_string() {
        let result = EmbeddedSqlExtractor.extract(
            "src/main/java/dao/OrderDao.java",
            "class OrderDao {\n  String q = \"select * from t_order where id = ?\";\n}",
        );
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].source, Source::EmbeddedSql);
        assert_eq!(result.candidates[0].table_name, "t_order");
        assert_eq!(result.candidates[0].file_name, "OrderDao.java");
        assert_eq!(result.candidates[0].line, 2);
    }

    #[test]
    fn test_mybatis_placeholder_rejected() {
        let result = EmbeddedSqlExtractor.extract(
            "A.java",
            "sql.append(\"DELETE FROM #{tableName} WHERE id = ?\");",
        );
        assert!(result.candidates.is_empty());
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].source, Source::EmbeddedSql);
        assert!(result.rejected[0].has_reason(RejectReason::VariableForm));
    }

    #[test]
    fn test_identifier_fragments_skipped() {
        let result = EmbeddedSqlExtractor.extract(
            "A.java",
            "Date updateTime = fromCache(key);\nint count = list.size();",
        );
        assert!(result.candidates.is_empty());
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn test_comment_mentioning_from_is_scanned() {
        // The gate is textual, so prose in comments still counts.
        let result = EmbeddedSqlExtractor.extract("A.java", "// load rows from cache first");
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].table_name, "cache");
    }
}
