//! Extraction record log.
//!
//! Keeps an auditable trail of what the extractor decided for each answer.
//!
//! # Design Principles
//!
//! - **Append-only**: Records are stored in JSONL format, never modified.
//! - **Deterministic IDs**: Same answer and outcome always produce the same ID.
//! - **Raw answers stay out**: Only the answer's SHA256 is stored.

pub mod store;
pub mod types;

pub use store::RecordStore;
pub use types::{compute_hash, compute_record_id, ExtractionRecord, RecordStatus};
