//! Claim extraction from model answers.
//!
//! Turns raw answer text into at most one [`Claim`](crate::domain::Claim).
//! Refusal is an ordinary outcome, not an error: a wrong claim would poison
//! every downstream causal measurement, so ambiguity always resolves to no
//! claim.
//!
//! # Example
//!
//! ```
//! use claimcause::claims::extract_claim;
//!
//! let claim = extract_claim("\"Paris\"").unwrap();
//! assert_eq!(claim.text(), "Paris");
//! assert!(claim.token_ids().is_empty());
//!
//! assert!(extract_claim("The capital of France is Paris").is_none());
//! ```

pub mod extraction;

pub use extraction::{
    classify_answer, extract_claim, normalize_text, AcceptRule, Extraction, RefusalReason,
    DECLARATIVE_TERMINATOR, SHORT_ANSWER_MAX_TOKENS,
};
