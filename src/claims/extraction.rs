//! Conservative claim extraction from model answers.
//!
//! This is pattern selection, not semantic understanding. An answer yields
//! at most one claim, and anything that does not match a known safe shape
//! is refused.
//!
//! # Decision rules (first match wins)
//!
//! 1. Empty after normalization: refuse
//! 2. At most [`SHORT_ANSWER_MAX_TOKENS`] whitespace tokens: accept
//! 3. Ends with [`DECLARATIVE_TERMINATOR`]: accept
//! 4. Otherwise: refuse
//!
//! # Normalization
//!
//! Leading and trailing whitespace and quote characters (`"` and `'`) are
//! removed in one pass, so `" Paris "` becomes `Paris` and an answer made
//! only of quotes and whitespace becomes empty. Quotes inside the text are
//! kept.

use serde::{Deserialize, Serialize};

use crate::domain::Claim;

/// Answers with this many whitespace tokens or fewer are taken as-is
pub const SHORT_ANSWER_MAX_TOKENS: usize = 3;

/// Longer answers must end with this character to be accepted
pub const DECLARATIVE_TERMINATOR: char = '.';

const QUOTE_CHARS: [char; 2] = ['"', '\''];

/// Which rule accepted the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptRule {
    /// Short answer such as a named entity
    ShortAnswer,
    /// Sentence ending with a period
    Declarative,
}

impl AcceptRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptRule::ShortAnswer => "short_answer",
            AcceptRule::Declarative => "declarative",
        }
    }
}

/// Why no claim was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefusalReason {
    /// Nothing left after normalization
    Empty,
    /// Too long to be a short answer and not a terminated sentence
    Ambiguous,
}

impl RefusalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefusalReason::Empty => "empty",
            RefusalReason::Ambiguous => "ambiguous",
        }
    }
}

/// Outcome of running the extractor over one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Extraction {
    Accepted { claim: Claim, rule: AcceptRule },
    Refused { reason: RefusalReason },
}

impl Extraction {
    pub fn claim(&self) -> Option<&Claim> {
        match self {
            Extraction::Accepted { claim, .. } => Some(claim),
            Extraction::Refused { .. } => None,
        }
    }

    pub fn into_claim(self) -> Option<Claim> {
        match self {
            Extraction::Accepted { claim, .. } => Some(claim),
            Extraction::Refused { .. } => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Extraction::Accepted { .. })
    }
}

/// Normalize answer text before applying the decision rules.
///
/// Strips surrounding whitespace and quote characters in a single pass.
/// Normalizing already-normalized text returns it unchanged.
pub fn normalize_text(text: &str) -> String {
    text.trim_matches(|c: char| c.is_whitespace() || QUOTE_CHARS.contains(&c))
        .to_string()
}

/// Decide whether `answer_text` contains a single safe factual claim
pub fn classify_answer(answer_text: &str) -> Extraction {
    let normalized = normalize_text(answer_text);

    if normalized.is_empty() {
        tracing::debug!("Refusing claim: empty answer");
        return Extraction::Refused {
            reason: RefusalReason::Empty,
        };
    }

    let token_count = normalized.split_whitespace().count();

    let rule = if token_count <= SHORT_ANSWER_MAX_TOKENS {
        AcceptRule::ShortAnswer
    } else if normalized.ends_with(DECLARATIVE_TERMINATOR) {
        AcceptRule::Declarative
    } else {
        tracing::debug!(token_count, "Refusing claim: ambiguous answer");
        return Extraction::Refused {
            reason: RefusalReason::Ambiguous,
        };
    };

    tracing::debug!(token_count, rule = rule.as_str(), "Claim extracted");
    Extraction::Accepted {
        claim: Claim::factual(normalized),
        rule,
    }
}

/// Extract at most one factual claim, or `None` when the answer is unsafe
/// to attribute.
///
/// The returned claim has no token ids; those come from a tokenizer later.
pub fn extract_claim(answer_text: &str) -> Option<Claim> {
    classify_answer(answer_text).into_claim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClaimType;

    #[test]
    fn test_normalize_trims_and_unquotes() {
        assert_eq!(normalize_text("  Paris \n"), "Paris");
        assert_eq!(normalize_text("\"Paris\""), "Paris");
        assert_eq!(normalize_text("'Paris'"), "Paris");
        assert_eq!(normalize_text("  \" Paris \"  "), "Paris");
    }

    #[test]
    fn test_normalize_nested_quotes() {
        assert_eq!(normalize_text("\"\"Paris\"\""), "Paris");
        assert_eq!(normalize_text("\"'Paris'\""), "Paris");
        assert_eq!(normalize_text("'\"Paris\"'"), "Paris");
    }

    #[test]
    fn test_normalize_unbalanced_quote() {
        assert_eq!(normalize_text("\"Paris"), "Paris");
        assert_eq!(normalize_text("Paris'"), "Paris");
    }

    #[test]
    fn test_normalize_keeps_inner_quotes() {
        assert_eq!(
            normalize_text("He said \"no\" twice."),
            "He said \"no\" twice."
        );
    }

    #[test]
    fn test_normalize_is_stable_on_normalized_text() {
        for input in [
            "Paris",
            "  'Paris'  ",
            "The capital of France is Paris.",
            "",
            "日本",
            "\"\"Paris\"\"",
            "'\"Paris\"'",
            "\"Paris",
            "\" ' Paris ' \"",
            "\"' '\"",
        ] {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_short_answer_rule() {
        let extraction = classify_answer("Paris");
        assert_eq!(
            extraction,
            Extraction::Accepted {
                claim: Claim::factual("Paris"),
                rule: AcceptRule::ShortAnswer,
            }
        );

        let claim = extract_claim("New York City").unwrap();
        assert_eq!(claim.text(), "New York City");
        assert_eq!(claim.claim_type(), ClaimType::Factual);
        assert!(claim.token_ids().is_empty());
    }

    #[test]
    fn test_declarative_rule() {
        let extraction = classify_answer("The capital of France is Paris.");
        assert!(matches!(
            extraction,
            Extraction::Accepted {
                rule: AcceptRule::Declarative,
                ..
            }
        ));
    }

    #[test]
    fn test_four_tokens_without_period_refused() {
        assert_eq!(
            classify_answer("Paris is the capital"),
            Extraction::Refused {
                reason: RefusalReason::Ambiguous
            }
        );
    }

    #[test]
    fn test_short_answer_wins_over_punctuation() {
        // Three tokens: accepted whatever the trailing character
        assert!(extract_claim("Is it Paris?").is_some());
        assert!(extract_claim("Paris, France!").is_some());
    }

    #[test]
    fn test_empty_inputs_refused() {
        for input in [
            "",
            "   ",
            "\n\t",
            "\"\"",
            "''",
            "\" \"",
            "'\"\"'",
            "\"",
            "\"' '\"",
            "'' ''",
        ] {
            assert_eq!(
                classify_answer(input),
                Extraction::Refused {
                    reason: RefusalReason::Empty
                },
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_non_ascii_and_punctuation_do_not_panic() {
        assert_eq!(extract_claim("東京").unwrap().text(), "東京");
        assert!(extract_claim("...").is_some());
        assert!(extract_claim("¿Cuál es la capital de Francia").is_none());
        assert!(extract_claim("La capitale de la France est Paris.").is_some());
    }

    #[test]
    fn test_extraction_json_shape() {
        let json = serde_json::to_value(classify_answer("Paris")).unwrap();
        assert_eq!(json["status"], "accepted");
        assert_eq!(json["rule"], "short_answer");
        assert_eq!(json["claim"]["text"], "Paris");
        assert_eq!(json["claim"]["claim_type"], "factual");

        let json = serde_json::to_value(classify_answer("")).unwrap();
        assert_eq!(json["status"], "refused");
        assert_eq!(json["reason"], "empty");
    }
}
