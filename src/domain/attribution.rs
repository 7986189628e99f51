//! A claim together with the prompt spans it is tested against.

use serde::{Deserialize, Serialize};

use super::claim::Claim;
use super::error::AttributionError;
use super::span::{Span, SpanRole};

/// One claim and the spans drawn from the prompt that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribution {
    pub claim: Claim,
    spans: Vec<Span>,
}

impl Attribution {
    pub fn new(claim: Claim, spans: Vec<Span>) -> Self {
        Self { claim, spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Indices of spans still awaiting a counterfactual test, in prompt order.
    ///
    /// Span class is not consulted, so `Unknown` spans are never skipped.
    pub fn pending(&self) -> Vec<usize> {
        self.spans
            .iter()
            .enumerate()
            .filter(|(_, span)| !span.is_assigned())
            .map(|(i, _)| i)
            .collect()
    }

    /// Record the measured role for the span at `index`
    pub fn assign(&mut self, index: usize, role: SpanRole) -> Result<(), AttributionError> {
        let len = self.spans.len();
        let span = self
            .spans
            .get_mut(index)
            .ok_or(AttributionError::SpanIndexOutOfRange { index, len })?;
        span.assign_role(role)
    }

    /// True once every span carries a terminal role
    pub fn is_complete(&self) -> bool {
        self.spans.iter().all(Span::is_assigned)
    }

    pub fn spans_with_role(&self, role: SpanRole) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |span| span.role() == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SpanClass;

    fn sample() -> Attribution {
        Attribution::new(
            Claim::factual("Paris"),
            vec![
                Span::new("You are a helpful assistant.", SpanClass::Context),
                Span::new("Answer in one word.", SpanClass::Instruction),
                Span::new("What is the capital of France?", SpanClass::Interrogative),
                Span::new("~~ ~~", SpanClass::Unknown),
            ],
        )
    }

    #[test]
    fn test_pending_includes_unknown() {
        let attribution = sample();
        assert_eq!(attribution.pending(), vec![0, 1, 2, 3]);
        assert!(!attribution.is_complete());
    }

    #[test]
    fn test_assign_until_complete() {
        let mut attribution = sample();
        attribution.assign(2, SpanRole::PrimaryQuery).unwrap();
        attribution.assign(1, SpanRole::InstructionalModifier).unwrap();
        assert_eq!(attribution.pending(), vec![0, 3]);

        attribution.assign(0, SpanRole::ContextualBackground).unwrap();
        attribution.assign(3, SpanRole::ContextualBackground).unwrap();
        assert!(attribution.pending().is_empty());
        assert!(attribution.is_complete());
        assert_eq!(
            attribution
                .spans_with_role(SpanRole::ContextualBackground)
                .count(),
            2
        );
    }

    #[test]
    fn test_assign_out_of_range() {
        let mut attribution = sample();
        assert_eq!(
            attribution.assign(9, SpanRole::PrimaryQuery),
            Err(AttributionError::SpanIndexOutOfRange { index: 9, len: 4 })
        );
    }

    #[test]
    fn test_empty_attribution_is_complete() {
        let attribution = Attribution::new(Claim::factual("Paris"), Vec::new());
        assert!(attribution.is_complete());
    }
}
