//! claimcause - Claim attribution via logit causality
//!
//! Picks the single factual claim in a model answer and defines the
//! vocabulary used to attribute it to spans of the prompt by counterfactual
//! removal.
//!
//! # Architecture
//!
//! - Extraction is conservative: ambiguous answers yield no claim
//! - A claim's token ids are filled once, by an external tokenizer
//! - A span's role is set once, as the outcome of a counterfactual test
//!
//! # Modules
//!
//! - `claims`: Claim extraction heuristic
//! - `domain`: Data structures (Claim, Span, Attribution)
//! - `records`: Append-only log of extraction outcomes
//! - `config`: Path and limit configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Extract the claim from an answer
//! echo '"Paris"' | claimcause extract
//!
//! # Extract and keep a record of the outcome
//! claimcause extract --text "The capital of France is Paris." --record
//! claimcause records list
//! ```

pub mod claims;
pub mod cli;
pub mod config;
pub mod domain;
pub mod records;

// Re-export main types at crate root for convenience
pub use claims::{classify_answer, extract_claim, Extraction};
pub use domain::{Attribution, AttributionError, Claim, ClaimType, Span, SpanClass, SpanRole};
pub use records::{ExtractionRecord, RecordStore};
