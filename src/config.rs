use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    normalize::DenyList,
    schema::{DEFAULT_SCHEMA, SchemaOptions},
};

pub const CONFIG_FILE_NAME: &str = ".tablescanrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_schema")]
    pub default_schema: String,
    #[serde(default = "default_guess_schema")]
    pub guess_schema: bool,
    #[serde(default)]
    pub extra_keywords: Vec<String>,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["**/main".to_string()]
}

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

fn default_guess_schema() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            includes: default_includes(),
            ignores: Vec::new(),
            default_schema: default_schema(),
            guess_schema: default_guess_schema(),
            extra_keywords: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or `includes` is
    /// invalid, or if `defaultSchema` is blank.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.default_schema.trim().is_empty() {
            bail!("'defaultSchema' must not be empty");
        }

        Ok(())
    }

    pub fn schema_options(&self) -> SchemaOptions {
        SchemaOptions {
            default_schema: self.default_schema.clone(),
            guess: self.guess_schema,
        }
    }

    pub fn deny_list(&self) -> DenyList {
        DenyList::new(&self.extra_keywords)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
