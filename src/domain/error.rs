//! Errors raised when the attribution vocabulary is misused.

use thiserror::Error;

use super::span::SpanRole;

/// Violations of the claim/span lifecycle rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributionError {
    #[error("Claim is already tokenized ({count} token ids)")]
    AlreadyTokenized { count: usize },

    #[error("Tokenization produced no token ids")]
    EmptyTokenization,

    #[error("Tokenizer failed: {0}")]
    Tokenizer(String),

    #[error("Invalid role transition: {current:?} -> {attempted:?}")]
    RoleAlreadyAssigned {
        current: SpanRole,
        attempted: SpanRole,
    },

    #[error("Cannot assign non-terminal role {0:?}")]
    NonTerminalRole(SpanRole),

    #[error("Span index {index} out of range ({len} spans)")]
    SpanIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}
