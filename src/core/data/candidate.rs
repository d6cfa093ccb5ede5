use std::{cmp::Ordering, fmt};

use serde::Serialize;

/// The construct that produced a candidate.
///
/// Ordering follows the rendered tag (`"@Delete" < "@Insert" < ... < "XML"`),
/// because reports sort on the tag text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Source {
    /// Keyword rule over a MyBatis mapper XML file.
    #[serde(rename = "XML")]
    MapperXml,
    /// Keyword rule over SQL-looking lines of a Java file.
    #[serde(rename = "Java SQL")]
    EmbeddedSql,
    /// `@TableName("...")` entity declaration.
    #[serde(rename = "@TableName")]
    TableName,
    #[serde(rename = "@Select")]
    Select,
    #[serde(rename = "@Insert")]
    Insert,
    #[serde(rename = "@Update")]
    Update,
    #[serde(rename = "@Delete")]
    Delete,
}

impl Source {
    pub const ALL: [Source; 7] = [
        Source::MapperXml,
        Source::TableName,
        Source::Select,
        Source::Insert,
        Source::Update,
        Source::Delete,
        Source::EmbeddedSql,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::MapperXml => "XML",
            Source::EmbeddedSql => "Java SQL",
            Source::TableName => "@TableName",
            Source::Select => "@Select",
            Source::Insert => "@Insert",
            Source::Update => "@Update",
            Source::Delete => "@Delete",
        }
    }

    /// True for tags produced from Java annotations.
    pub fn is_annotation(&self) -> bool {
        self.as_str().starts_with('@')
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialOrd for Source {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Source {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

/// How a schema label was decided for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaOrigin {
    /// `@DS` on the type declared in (or named like) the candidate's file.
    Declared,
    /// `@DS` on a file whose absolute path contains the candidate's file name.
    DeclaredPath,
    /// Run-wide `method` override.
    Method,
    /// Hash partition of the table name; no declaration backs it.
    Guessed,
    /// File name mentions the schema.
    FileName,
    /// Nothing matched.
    Default,
}

impl SchemaOrigin {
    /// Whether the label comes from an `@DS` declaration in the sources.
    pub fn is_declared(&self) -> bool {
        matches!(
            self,
            SchemaOrigin::Declared | SchemaOrigin::DeclaredPath | SchemaOrigin::Method
        )
    }
}

impl fmt::Display for SchemaOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaOrigin::Declared => write!(f, "declared"),
            SchemaOrigin::DeclaredPath => write!(f, "declared-path"),
            SchemaOrigin::Method => write!(f, "method"),
            SchemaOrigin::Guessed => write!(f, "guessed"),
            SchemaOrigin::FileName => write!(f, "file-name"),
            SchemaOrigin::Default => write!(f, "default"),
        }
    }
}

/// Schema label plus the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Attribution {
    pub schema: String,
    pub origin: SchemaOrigin,
}

impl Attribution {
    pub fn new(schema: impl Into<String>, origin: SchemaOrigin) -> Self {
        Self {
            schema: schema.into(),
            origin,
        }
    }
}

/// One observation of a table name at a file/line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Candidate {
    pub source: Source,
    /// Raw match before cleaning; the cleaned name after normalization.
    pub table_name: String,
    /// Base name of the originating file, extension included.
    pub file_name: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Set by the schema attributor.
    #[serde(flatten)]
    pub attribution: Option<Attribution>,
}

impl Candidate {
    pub fn new(
        source: Source,
        table_name: impl Into<String>,
        file_name: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            source,
            table_name: table_name.into(),
            file_name: file_name.into(),
            line,
            attribution: None,
        }
    }

    /// Schema label, empty until attributed.
    pub fn schema(&self) -> &str {
        self.attribution
            .as_ref()
            .map(|a| a.schema.as_str())
            .unwrap_or("")
    }

    pub fn origin(&self) -> Option<SchemaOrigin> {
        self.attribution.as_ref().map(|a| a.origin)
    }

    pub fn with_attribution(self, attribution: Attribution) -> Self {
        Self {
            attribution: Some(attribution),
            ..self
        }
    }

    pub fn with_table_name(self, table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..self
        }
    }

    /// Canonical report ordering: source, schema, table, file, line.
    pub fn report_cmp(&self, other: &Self) -> Ordering {
        self.source
            .cmp(&other.source)
            .then_with(|| self.schema().cmp(other.schema()))
            .then_with(|| self.table_name.cmp(&other.table_name))
            .then_with(|| self.file_name.cmp(&other.file_name))
            .then_with(|| self.line.cmp(&other.line))
    }
}
