//! Tablescan - database table inventory for Java / MyBatis code bases
//!
//! Tablescan reads Java sources and mapper XML files, finds every place a
//! database table is named (mapper SQL, `@TableName`, `@Select`-style
//! annotations, SQL strings in code), attributes each table to a data source
//! via `@DS` markers, and produces a cleaned, deduplicated inventory.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, console report, export)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, schema attribution and normalization pipeline

pub mod cli;
pub mod config;
pub mod core;
