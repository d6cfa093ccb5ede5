//! Schema attribution: which data source each table belongs to.
//!
//! Two steps with a barrier between them. [`SchemaIndex::build`] scans every
//! loaded file for dynamic-datasource `@DS("label")` markers; only once the
//! whole index exists does [`SchemaAttributor`] label candidates.
//!
//! Labeling rules, first match wins:
//! 1. the candidate's file stem is a declared type or file stem in the index;
//! 2. an indexed absolute path contains the candidate's file name;
//! 3. the index holds the run-wide `method` key;
//! 4. hash partition of the cleaned table name (`slave` / `mdb`), if enabled;
//! 5. the file name mentions `slave` or `mdb`;
//! 6. the default schema.

use std::{
    collections::BTreeMap,
    path::{self, Path},
    sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{
    data::{Attribution, Candidate, SchemaOrigin},
    normalize::filter_table_chars,
    source::SourceFile,
};

pub const DEFAULT_SCHEMA: &str = "master";
pub const SLAVE_SCHEMA: &str = "slave";
pub const MDB_SCHEMA: &str = "mdb";

/// Index key that applies one label to every otherwise unmatched candidate.
pub const METHOD_KEY: &str = "method";

static DS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"@DS\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap());

static TYPE_DECL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"public\s+(?:class|interface)\s+(\w+)").unwrap());

/// `@DS` declarations collected from the whole file set.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIndex {
    /// Type names and file stems.
    by_name: BTreeMap<String, String>,
    /// Absolute file paths.
    by_path: BTreeMap<String, String>,
    /// Number of `@DS` markers seen, including ones with no type to attach to.
    marker_count: usize,
}

impl SchemaIndex {
    /// Scan all files for `@DS` markers.
    ///
    /// Files are visited in path order; a later file overwrites an earlier
    /// one for the same key.
    pub fn build(files: &[SourceFile]) -> Self {
        let mut ordered: Vec<&SourceFile> = files.iter().collect();
        ordered.sort_by(|a, b| a.path.cmp(&b.path));

        let mut index = Self::default();
        for file in ordered {
            index.add_file(file);
        }
        index
    }

    fn add_file(&mut self, file: &SourceFile) {
        for caps in DS_REGEX.captures_iter(&file.text) {
            self.marker_count += 1;

            let (Some(marker), Some(label)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(type_name) = nearest_type_declaration(&file.text, marker.start()) else {
                continue;
            };
            let label = label.as_str().to_string();

            self.by_name.insert(type_name.to_string(), label.clone());
            if let Some(stem) = Path::new(&file.path).file_stem().and_then(|s| s.to_str()) {
                self.by_name.insert(stem.to_string(), label.clone());
            }
            self.by_path.insert(absolute_path(&file.path), label);
        }
    }

    pub fn by_name(&self, key: &str) -> Option<&str> {
        self.by_name.get(key).map(String::as_str)
    }

    /// First indexed path (in path order) containing `needle`.
    pub fn by_path_containing(&self, needle: &str) -> Option<&str> {
        self.by_path
            .iter()
            .find(|(path, _)| path.contains(needle))
            .map(|(_, label)| label.as_str())
    }

    pub fn method_override(&self) -> Option<&str> {
        self.by_name(METHOD_KEY)
    }

    pub fn marker_count(&self) -> usize {
        self.marker_count
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.by_path.is_empty()
    }
}

/// The type a marker at `pos` belongs to: the last `public class|interface`
/// before it, or failing that the first one after it.
fn nearest_type_declaration(text: &str, pos: usize) -> Option<&str> {
    let mut before = None;
    for caps in TYPE_DECL_REGEX.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() < pos {
            before = Some(name.as_str());
        } else {
            return before.or(Some(name.as_str()));
        }
    }
    before
}

fn absolute_path(path: &str) -> String {
    path::absolute(path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Hash partition for tables with no declared schema.
///
/// Roughly a quarter of names go to `slave` and another quarter to `mdb`,
/// decided by the first byte of the md5 digest. Empty names get no guess.
pub fn guess_schema(cleaned_table_name: &str) -> Option<&'static str> {
    if cleaned_table_name.is_empty() {
        return None;
    }
    let digest = md5::compute(cleaned_table_name.as_bytes());
    match digest.0[0] {
        0..64 => Some(SLAVE_SCHEMA),
        64..128 => Some(MDB_SCHEMA),
        _ => None,
    }
}

/// Tunables for labeling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaOptions {
    pub default_schema: String,
    pub guess: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            default_schema: DEFAULT_SCHEMA.to_string(),
            guess: true,
        }
    }
}

/// Applies a finished [`SchemaIndex`] to candidates.
pub struct SchemaAttributor<'a> {
    index: &'a SchemaIndex,
    options: &'a SchemaOptions,
}

impl<'a> SchemaAttributor<'a> {
    pub fn new(index: &'a SchemaIndex, options: &'a SchemaOptions) -> Self {
        Self { index, options }
    }

    /// Label every candidate, returning new values.
    pub fn attribute(&self, candidates: &[Candidate]) -> Vec<Candidate> {
        candidates
            .iter()
            .map(|c| c.clone().with_attribution(self.resolve(c)))
            .collect()
    }

    pub fn resolve(&self, candidate: &Candidate) -> Attribution {
        let file_name = candidate.file_name.as_str();
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        if let Some(label) = self.index.by_name(stem) {
            return Attribution::new(label, SchemaOrigin::Declared);
        }
        if let Some(label) = self.index.by_path_containing(file_name) {
            return Attribution::new(label, SchemaOrigin::DeclaredPath);
        }
        if let Some(label) = self.index.method_override() {
            return Attribution::new(label, SchemaOrigin::Method);
        }
        if self.options.guess
            && let Some(label) = guess_schema(&filter_table_chars(&candidate.table_name))
        {
            return Attribution::new(label, SchemaOrigin::Guessed);
        }

        let lower = file_name.to_lowercase();
        if lower.contains(SLAVE_SCHEMA) {
            return Attribution::new(SLAVE_SCHEMA, SchemaOrigin::FileName);
        }
        if lower.contains(MDB_SCHEMA) {
            return Attribution::new(MDB_SCHEMA, SchemaOrigin::FileName);
        }

        Attribution::new(&self.options.default_schema, SchemaOrigin::Default)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::data::Source;

    fn no_guess() -> SchemaOptions {
        SchemaOptions {
            guess: false,
            ..SchemaOptions::default()
        }
    }

    fn candidate(table: &str, file: &str) -> Candidate {
        Candidate::new(Source::MapperXml, table, file, 1)
    }

    fn slave_mapper() -> SourceFile {
        SourceFile::new(
            "/repo/src/main/java/com/shop/ReportMapper.java",
            "package com.shop;\n\n@DS(\"slave\")\npublic interface ReportMapper {\n}\n",
        )
    }

    #[test]
    fn test_index_records_type_stem_and_path() {
        let index = SchemaIndex::build(&[slave_mapper()]);
        assert_eq!(index.marker_count(), 1);
        assert_eq!(index.by_name("ReportMapper"), Some("slave"));
        assert_eq!(
            index.by_path_containing("/repo/src/main/java/com/shop/ReportMapper.java"),
            Some("slave")
        );
    }

    #[test]
    fn test_index_type_name_differs_from_stem() {
        let file = SourceFile::new(
            "/repo/Legacy.java",
            "@DS('mdb')\npublic class LegacyDao {}",
        );
        let index = SchemaIndex::build(&[file]);
        assert_eq!(index.by_name("LegacyDao"), Some("mdb"));
        assert_eq!(index.by_name("Legacy"), Some("mdb"));
    }

    #[test]
    fn test_method_level_marker_uses_enclosing_type() {
        let file = SourceFile::new(
            "/repo/OrderService.java",
            "public class OrderService {\n  @DS(\"slave\")\n  public void report() {}\n}\n\
             public class Helper {}",
        );
        let index = SchemaIndex::build(&[file]);
        assert_eq!(index.by_name("OrderService"), Some("slave"));
        assert_eq!(index.by_name("Helper"), None);
    }

    #[test]
    fn test_marker_without_type_counted_only() {
        let file = SourceFile::new("/repo/package-info.java", "@DS(\"slave\")\npackage x;");
        let index = SchemaIndex::build(&[file]);
        assert_eq!(index.marker_count(), 1);
        assert!(index.is_empty());
    }

    #[test]
    fn test_later_file_overwrites() {
        let a = SourceFile::new("/repo/a/Dao.java", "@DS(\"slave\")\npublic class Dao {}");
        let b = SourceFile::new("/repo/b/Dao.java", "@DS(\"mdb\")\npublic class Dao {}");
        // Input order does not matter; path order does.
        let index = SchemaIndex::build(&[b, a]);
        assert_eq!(index.by_name("Dao"), Some("mdb"));
    }

    #[test]
    fn test_xml_mapper_inherits_interface_schema() {
        let index = SchemaIndex::build(&[slave_mapper()]);
        let options = no_guess();
        let attributor = SchemaAttributor::new(&index, &options);

        let attribution = attributor.resolve(&candidate("t_report", "ReportMapper.xml"));
        assert_eq!(attribution, Attribution::new("slave", SchemaOrigin::Declared));
    }

    #[test]
    fn test_path_rule() {
        let index = SchemaIndex::build(&[slave_mapper()]);
        let options = no_guess();
        let attributor = SchemaAttributor::new(&index, &options);

        // Stem "shop" is not indexed, but the path contains "shop".
        let attribution = attributor.resolve(&candidate("t_x", "shop"));
        assert_eq!(
            attribution,
            Attribution::new("slave", SchemaOrigin::DeclaredPath)
        );
    }

    #[test]
    fn test_method_override() {
        let file = SourceFile::new("/repo/M.java", "@DS(\"mdb\")\npublic class method {}");
        let index = SchemaIndex::build(&[file]);
        let options = no_guess();
        let attributor = SchemaAttributor::new(&index, &options);

        let attribution = attributor.resolve(&candidate("t_x", "Other.xml"));
        assert_eq!(attribution, Attribution::new("mdb", SchemaOrigin::Method));
    }

    #[test]
    fn test_file_name_rule_and_default() {
        let index = SchemaIndex::default();
        let options = no_guess();
        let attributor = SchemaAttributor::new(&index, &options);

        assert_eq!(
            attributor.resolve(&candidate("t", "SlaveOrderMapper.xml")),
            Attribution::new("slave", SchemaOrigin::FileName)
        );
        assert_eq!(
            attributor.resolve(&candidate("t", "MdbMapper.xml")),
            Attribution::new("mdb", SchemaOrigin::FileName)
        );
        assert_eq!(
            attributor.resolve(&candidate("t", "OrderMapper.xml")),
            Attribution::new("master", SchemaOrigin::Default)
        );
    }

    #[test]
    fn test_custom_default_schema() {
        let index = SchemaIndex::default();
        let options = SchemaOptions {
            default_schema: "primary".to_string(),
            guess: false,
        };
        let attributor = SchemaAttributor::new(&index, &options);
        assert_eq!(attributor.resolve(&candidate("t", "A.xml")).schema, "primary");
    }

    #[test]
    fn test_guess_is_stable_and_matches_digest() {
        for name in ["orders", "t_user", "audit_log", "sys_dict", "a.b"] {
            let first = md5::compute(name.as_bytes()).0[0];
            let expected = if first < 64 {
                Some(SLAVE_SCHEMA)
            } else if first < 128 {
                Some(MDB_SCHEMA)
            } else {
                None
            };
            assert_eq!(guess_schema(name), expected, "{}", name);
            assert_eq!(guess_schema(name), guess_schema(name));
        }
        assert_eq!(guess_schema(""), None);
    }

    #[test]
    fn test_guess_precedes_file_name_rule() {
        let index = SchemaIndex::default();
        let options = SchemaOptions::default();
        let attributor = SchemaAttributor::new(&index, &options);

        let attribution = attributor.resolve(&candidate("orders", "SlaveMapper.xml"));
        match guess_schema("orders") {
            Some(label) => assert_eq!(attribution, Attribution::new(label, SchemaOrigin::Guessed)),
            None => assert_eq!(
                attribution,
                Attribution::new("slave", SchemaOrigin::FileName)
            ),
        }
    }

    #[test]
    fn test_guess_uses_cleaned_name() {
        let index = SchemaIndex::default();
        let options = SchemaOptions::default();
        let attributor = SchemaAttributor::new(&index, &options);

        let raw = attributor.resolve(&candidate("crm . customer", "A.xml"));
        let clean = attributor.resolve(&candidate("crm.customer", "A.xml"));
        assert_eq!(raw, clean);
    }

    #[test]
    fn test_attribute_keeps_input_untouched() {
        let index = SchemaIndex::default();
        let options = no_guess();
        let attributor = SchemaAttributor::new(&index, &options);

        let input = vec![candidate("a", "A.xml"), candidate("b", "B.xml")];
        let output = attributor.attribute(&input);

        assert!(input.iter().all(|c| c.attribution.is_none()));
        assert!(output.iter().all(|c| c.schema() == "master"));
        assert_eq!(output[1].table_name, "b");
    }
}
