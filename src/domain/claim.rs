//! Claim types.
//!
//! A claim is always taken from the model's answer, never from the prompt.
//! Its token ids start empty and are filled once by a tokenizer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AttributionError;

/// Kind of claim being attributed.
///
/// Only factual assertions are supported. New kinds are a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    /// A simple factual assertion (e.g. "Paris")
    Factual,
}

impl ClaimType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Factual => "factual",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimType {
    type Err = AttributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "factual" => Ok(ClaimType::Factual),
            other => Err(AttributionError::UnknownVariant {
                kind: "claim type",
                value: other.to_string(),
            }),
        }
    }
}

/// Turns claim text into token ids for probability measurement.
///
/// Implemented outside this crate by whatever model backend is in use.
pub trait Tokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>, AttributionError>;
}

/// The factual assertion to be causally explained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    text: String,
    claim_type: ClaimType,
    #[serde(default)]
    token_ids: Vec<u32>,
}

impl Claim {
    /// Create an untokenized factual claim
    pub fn factual(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            claim_type: ClaimType::Factual,
            token_ids: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn claim_type(&self) -> ClaimType {
        self.claim_type
    }

    pub fn token_ids(&self) -> &[u32] {
        &self.token_ids
    }

    /// Whether the tokenization stage has run
    pub fn is_tokenized(&self) -> bool {
        !self.token_ids.is_empty()
    }

    /// Store the token ids produced by a tokenizer.
    ///
    /// Allowed exactly once, with a non-empty sequence.
    pub fn attach_tokens(&mut self, token_ids: Vec<u32>) -> Result<(), AttributionError> {
        if self.is_tokenized() {
            return Err(AttributionError::AlreadyTokenized {
                count: self.token_ids.len(),
            });
        }
        if token_ids.is_empty() {
            return Err(AttributionError::EmptyTokenization);
        }

        tracing::debug!(tokens = token_ids.len(), claim = %self.text, "Claim tokenized");
        self.token_ids = token_ids;
        Ok(())
    }

    /// Run `tokenizer` over the claim text and attach the result
    pub fn tokenize_with(&mut self, tokenizer: &dyn Tokenizer) -> Result<(), AttributionError> {
        if self.is_tokenized() {
            return Err(AttributionError::AlreadyTokenized {
                count: self.token_ids.len(),
            });
        }
        let ids = tokenizer.encode(&self.text)?;
        self.attach_tokens(ids)
    }
}
