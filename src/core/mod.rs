//! Table inventory engine.
//!
//! ## Module Structure
//!
//! - `data`: Candidate, RejectedCandidate and their tags
//! - `source`: loaded files and file kinds
//! - `file_scanner`: discovery of `.java` / `.xml` files
//! - `extract`: extraction strategies and the coordinator
//! - `schema`: `@DS` index and schema attribution
//! - `normalize`: cleaning, deduplication, ordering
//! - `summary`: aggregate counts
//! - `pipeline`: the stage chain over a loaded file set
//! - `context`: ScanContext (config + discovery + lazy pipeline)
//!
//! ## Pipeline
//!
//! 1. **Extraction** (`extract::Coordinator`): per-file candidates, in parallel
//! 2. **Schema pre-pass** (`schema::SchemaIndex`): `@DS` markers across all files
//! 3. **Attribution** (`schema::SchemaAttributor`): one label per candidate
//! 4. **Normalization** (`normalize`): clean, deduplicate, build the inventory

pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod source;
pub mod summary;

pub use context::ScanContext;
pub use data::{Attribution, Candidate, RejectReason, RejectedCandidate, SchemaOrigin, Source};
pub use pipeline::{Pipeline, ScanReport};
