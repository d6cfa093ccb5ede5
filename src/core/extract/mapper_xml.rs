use super::{Extract, Extraction, keyword};
use crate::core::{data::Source, source::file_name_of};

/// Table references in MyBatis mapper XML.
///
/// Plain text scan: SQL lives in free-form text nodes, so the keyword rule
/// runs on every line regardless of the surrounding tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperXmlExtractor;

impl Extract for MapperXmlExtractor {
    fn name(&self) -> &'static str {
        "mapper-xml"
    }

    fn extract(&self, path: &str, text: &str) -> Extraction {
        let file_name = file_name_of(path);
        let mut extraction = Extraction::default();

        for (idx, line) in text.split('\n').enumerate() {
            for found in keyword::scan(line) {
                extraction.record(Source::MapperXml, file_name, idx + 1, found);
            }
        }

        extraction
    }
}
