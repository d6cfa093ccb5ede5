//! Core data types shared by every pipeline stage.
//!
//! ## Module Structure
//!
//! - `candidate`: Candidate, Source tag, schema Attribution
//! - `rejection`: RejectedCandidate and RejectReason flags

pub mod candidate;
pub mod rejection;

pub use candidate::{Attribution, Candidate, SchemaOrigin, Source};
pub use rejection::{RejectReason, RejectedCandidate};
