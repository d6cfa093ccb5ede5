//! Loaded input files.
//!
//! Files are read whole and decoded lossily so a stray byte sequence never
//! costs a file. Read failures are returned alongside the loaded files so the
//! caller can report partial failure.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

/// What kind of input a file is, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// MyBatis mapper XML.
    Xml,
    /// Java source.
    Source,
    /// Anything else. Never routed to an extractor.
    Other,
}

impl FileKind {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => FileKind::Xml,
            Some(ext) if ext.eq_ignore_ascii_case("java") => FileKind::Source,
            _ => FileKind::Other,
        }
    }

    /// Label used by the file statistics sheet.
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Xml => "XML",
            FileKind::Source => "Java",
            FileKind::Other => "Other",
        }
    }
}

/// A discovered file together with its decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub kind: FileKind,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            kind: FileKind::from_path(&path),
            path,
            text: text.into(),
        }
    }

    /// Base name with extension, e.g. `UserMapper.xml`.
    pub fn file_name(&self) -> &str {
        file_name_of(&self.path)
    }
}

/// Base name of a path, falling back to the path itself.
pub fn file_name_of(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// A file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadFailure {
    pub path: String,
    pub error: String,
}

/// Result of loading a file list.
#[derive(Debug, Default)]
pub struct LoadResult {
    /// Loaded files, sorted by path.
    pub files: Vec<SourceFile>,
    /// Files that failed to read, sorted by path.
    pub failures: Vec<ReadFailure>,
}

/// Read a file, replacing invalid UTF-8 instead of failing on it.
pub fn read_lossy(path: &str) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read every path in parallel.
pub fn load_files<S: AsRef<str> + Sync>(paths: &[S]) -> LoadResult {
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            (path.to_string(), read_lossy(path))
        })
        .collect();

    let mut loaded = LoadResult::default();
    for (path, result) in results {
        match result {
            Ok(text) => loaded.files.push(SourceFile::new(path, text)),
            Err(e) => loaded.failures.push(ReadFailure {
                path,
                error: format!("{:#}", e),
            }),
        }
    }

    loaded.files.sort_by(|a, b| a.path.cmp(&b.path));
    loaded.failures.sort_by(|a, b| a.path.cmp(&b.path));
    loaded
}
