//! Extraction record schema and id derivation.
//!
//! One record is one line of extractions.jsonl.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::claims::{AcceptRule, Extraction, RefusalReason};
use crate::domain::Claim;

/// Whether the extractor produced a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Accepted,
    Refused,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Accepted => "accepted",
            RecordStatus::Refused => "refused",
        }
    }
}

/// A line in extractions.jsonl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Deterministic record ID
    pub id: String,
    /// SHA256 hash of the raw answer text
    pub answer_sha256: String,
    /// Extraction outcome
    pub status: RecordStatus,
    /// Rule that accepted the answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<AcceptRule>,
    /// Reason the answer was refused
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RefusalReason>,
    /// The extracted claim (present if accepted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<Claim>,
    /// Timestamp when the record was created
    pub ts: String,
}

impl ExtractionRecord {
    /// Build a record for `extraction`, the outcome of running the
    /// extractor on `answer`
    pub fn new(answer: &str, extraction: &Extraction, ts: String) -> Self {
        let answer_sha256 = compute_hash(answer.as_bytes());

        let (status, rule, reason, claim) = match extraction {
            Extraction::Accepted { claim, rule } => {
                (RecordStatus::Accepted, Some(*rule), None, Some(claim.clone()))
            }
            Extraction::Refused { reason } => (RecordStatus::Refused, None, Some(*reason), None),
        };

        Self {
            id: compute_record_id(&answer_sha256, status),
            answer_sha256,
            status,
            rule,
            reason,
            claim,
            ts,
        }
    }
}

/// Compute SHA256 hash of a byte slice, returning hex string with prefix
pub fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Compute deterministic record ID: sha256(answer_sha256 + status)[0:16]
pub fn compute_record_id(answer_sha256: &str, status: RecordStatus) -> String {
    let mut hasher = Sha256::new();
    hasher.update(answer_sha256.as_bytes());
    hasher.update(status.as_str().as_bytes());

    let result = hasher.finalize();
    hex::encode(&result[..8]) // 16 hex chars = 8 bytes
}
