use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Unique `.java` / `.xml` paths, sorted.
    pub files: Vec<String>,
    pub skipped_count: usize,
    /// True when the includes matched no file and the whole root was scanned.
    pub used_fallback: bool,
}

/// Collect Java sources and XML mappers under `base_dir`.
///
/// `includes` name the directories to walk (globs are expanded to
/// directories, e.g. `**/main`). When they produce no file at all, the whole
/// `base_dir` is walked instead.
pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let ignores = IgnoreSet::new(base_dir, ignore_patterns, verbose);
    let mut skipped_count = 0;

    let dirs = include_dirs(base_dir, includes, verbose);
    let mut files = walk(&dirs, &ignores, &mut skipped_count, verbose);

    let used_fallback = files.is_empty() && !includes.is_empty();
    if used_fallback {
        if verbose {
            eprintln!(
                "{} No files under {}; scanning the whole source root",
                "note:".bold().cyan(),
                includes.join(", ")
            );
        }
        files = walk(
            &[Path::new(base_dir).to_path_buf()],
            &ignores,
            &mut skipped_count,
            verbose,
        );
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
        used_fallback,
    }
}

struct IgnoreSet {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &str, ignore_patterns: &[String], verbose: bool) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in ignore_patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid ignore pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            } else {
                // Literal path mode: prefix match against the joined path
                literal_paths.push(Path::new(base_dir).join(p));
            }
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.literal_paths.iter().any(|p| path.starts_with(p))
            || self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

fn include_dirs(base_dir: &str, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![Path::new(base_dir).to_path_buf()];
    }

    let mut paths = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            // Glob mode: expand pattern to matching directories
            let full_pattern = Path::new(base_dir).join(inc);
            let pattern_str = full_pattern.to_string_lossy();
            match glob(&pattern_str) {
                Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            inc,
                            e
                        );
                    }
                }
            }
        } else {
            let path = Path::new(base_dir).join(inc);
            if path.exists() {
                paths.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }
    paths
}

fn walk(
    dirs: &[PathBuf],
    ignores: &IgnoreSet,
    skipped_count: &mut usize,
    verbose: bool,
) -> BTreeSet<String> {
    let mut files = BTreeSet::new();

    for dir in dirs {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    *skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();

            if ignores.is_ignored(path) {
                continue;
            }

            if path.is_file() && is_scannable_file(path) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    files
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("java" | "xml")
    )
}
