use std::{cell::OnceCell, path::PathBuf};

use anyhow::Result;
use colored::Colorize;

use crate::{
    cli::args::ScanArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        file_scanner::scan_files,
        pipeline::{Pipeline, ScanReport},
        source::{LoadResult, load_files},
    },
};

/// Run state for one `scan` invocation.
///
/// Discovery happens eagerly in [`ScanContext::new`]; reading and the
/// pipeline run lazily on first access, each at most once.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--default-schema core`)
/// 2. `.tablescanrc.json`
/// 3. Built-in defaults
pub struct ScanContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory the scan starts from.
    pub root_dir: PathBuf,

    /// Discovered `.java` / `.xml` paths, sorted.
    pub files: Vec<String>,

    /// Paths walkdir could not access.
    pub skipped_count: usize,

    /// True when `includes` matched nothing and the whole root was scanned.
    pub used_fallback: bool,

    pub verbose: bool,

    loaded: OnceCell<LoadResult>,
    report: OnceCell<ScanReport>,
}

impl ScanContext {
    /// Load configuration, apply CLI overrides and discover input files.
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be parsed or fails validation
    /// after overrides are applied.
    pub fn new(args: &ScanArgs) -> Result<Self> {
        let verbose = args.common.verbose;

        // The config file is searched from the CLI source root, or the
        // current directory when none is given.
        let search_dir = args
            .common
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&search_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "{} No {} found, using default configuration",
                "note:".bold().cyan(),
                CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;

        if let Some(ref source_root) = args.common.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }
        if let Some(ref default_schema) = args.default_schema {
            config.default_schema = default_schema.clone();
        }
        if args.no_guess {
            config.guess_schema = false;
        }
        config.validate()?;

        let root_dir = PathBuf::from(&config.source_root);
        let scan_result = scan_files(
            &config.source_root,
            &config.includes,
            &config.ignores,
            verbose,
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            skipped_count: scan_result.skipped_count,
            used_fallback: scan_result.used_fallback,
            verbose,
            loaded: OnceCell::new(),
            report: OnceCell::new(),
        })
    }

    /// Read every discovered file (lazy initialization).
    pub fn loaded(&self) -> &LoadResult {
        self.loaded.get_or_init(|| {
            let loaded = load_files(&self.files);
            if self.verbose {
                for failure in &loaded.failures {
                    eprintln!(
                        "{} {} - {}",
                        "warning:".bold().yellow(),
                        failure.path,
                        failure.error
                    );
                }
            }
            loaded
        })
    }

    /// Run extraction, attribution and normalization (lazy initialization).
    pub fn report(&self) -> &ScanReport {
        self.report.get_or_init(|| {
            let pipeline = Pipeline::new(self.config.schema_options(), self.config.deny_list());
            pipeline.run(self.loaded(), self.files.len())
        })
    }
}
