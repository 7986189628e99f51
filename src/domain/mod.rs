//! Shared attribution vocabulary.
//!
//! This module contains the types every pipeline stage produces or consumes:
//! - Claim: the assertion being explained (text, type, token ids)
//! - Span: a unit of prompt text with a structural class and a causal role
//! - Attribution: one claim paired with the spans it is tested against

pub mod attribution;
pub mod claim;
pub mod error;
pub mod span;

// Re-export commonly used types
pub use attribution::Attribution;
pub use claim::{Claim, ClaimType, Tokenizer};
pub use error::AttributionError;
pub use span::{Span, SpanClass, SpanRole};
