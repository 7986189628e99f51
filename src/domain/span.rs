//! Prompt span types.
//!
//! A span is the unit of counterfactual testing. Two independent axes
//! describe it:
//!
//! - [`SpanClass`]: what *kind* of text it is, fixed at segmentation time
//! - [`SpanRole`]: what *effect* removing it has on the claim, set only
//!   after a counterfactual test
//!
//! Class never implies role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AttributionError;

/// Structural classification of a prompt span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanClass {
    /// Questions like "What is X?"
    Interrogative,
    /// Fenced or multiline code
    CodeBlock,
    /// Code assignments like `y = 0`
    Assignment,
    /// Style or format instructions
    Instruction,
    /// Background or framing text
    Context,
    /// Fallback: always tested, never skipped
    Unknown,
}

impl SpanClass {
    pub const ALL: [SpanClass; 6] = [
        SpanClass::Interrogative,
        SpanClass::CodeBlock,
        SpanClass::Assignment,
        SpanClass::Instruction,
        SpanClass::Context,
        SpanClass::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpanClass::Interrogative => "interrogative",
            SpanClass::CodeBlock => "code_block",
            SpanClass::Assignment => "assignment",
            SpanClass::Instruction => "instruction",
            SpanClass::Context => "context",
            SpanClass::Unknown => "unknown",
        }
    }

    /// True for the class used when segmentation could not decide
    pub fn is_fallback(&self) -> bool {
        matches!(self, SpanClass::Unknown)
    }
}

impl fmt::Display for SpanClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpanClass {
    type Err = AttributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpanClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| AttributionError::UnknownVariant {
                kind: "span class",
                value: s.to_string(),
            })
    }
}

/// Post-hoc causal role of a span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanRole {
    /// Removing this span collapses the claim completely
    PrimaryQuery,
    /// Removing this span changes style/format but not the fact
    InstructionalModifier,
    /// Removing this span has minimal or no effect
    ContextualBackground,
    /// No counterfactual test has run yet
    #[default]
    Unassigned,
}

impl SpanRole {
    pub const ALL: [SpanRole; 4] = [
        SpanRole::PrimaryQuery,
        SpanRole::InstructionalModifier,
        SpanRole::ContextualBackground,
        SpanRole::Unassigned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpanRole::PrimaryQuery => "primary_query",
            SpanRole::InstructionalModifier => "instructional_modifier",
            SpanRole::ContextualBackground => "contextual_background",
            SpanRole::Unassigned => "unassigned",
        }
    }

    /// Whether this role is an outcome of a counterfactual test
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SpanRole::Unassigned)
    }
}

impl fmt::Display for SpanRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpanRole {
    type Err = AttributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpanRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| AttributionError::UnknownVariant {
                kind: "span role",
                value: s.to_string(),
            })
    }
}

/// A contiguous portion of the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    text: String,
    span_class: SpanClass,
    #[serde(default)]
    role: SpanRole,
}

impl Span {
    /// Create a span as segmentation produces it: role unassigned
    pub fn new(text: impl Into<String>, span_class: SpanClass) -> Self {
        Self {
            text: text.into(),
            span_class,
            role: SpanRole::Unassigned,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span_class(&self) -> SpanClass {
        self.span_class
    }

    pub fn role(&self) -> SpanRole {
        self.role
    }

    pub fn is_assigned(&self) -> bool {
        self.role.is_terminal()
    }

    /// Record the outcome of the counterfactual test for this span.
    ///
    /// The role moves from `Unassigned` to exactly one terminal role and
    /// never changes afterwards. Callers testing the same span from several
    /// tasks must serialize calls to this method.
    pub fn assign_role(&mut self, role: SpanRole) -> Result<(), AttributionError> {
        if !role.is_terminal() {
            return Err(AttributionError::NonTerminalRole(role));
        }
        if self.role.is_terminal() {
            return Err(AttributionError::RoleAlreadyAssigned {
                current: self.role,
                attempted: role,
            });
        }

        tracing::debug!(class = %self.span_class, %role, "Span role assigned");
        self.role = role;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_span_is_unassigned() {
        for class in SpanClass::ALL {
            let span = Span::new("What is the capital of France?", class);
            assert_eq!(span.role(), SpanRole::Unassigned);
            assert_eq!(span.span_class(), class);
            assert!(!span.is_assigned());
        }
    }

    #[test]
    fn test_assign_role_once() {
        let mut span = Span::new("Answer in one word.", SpanClass::Instruction);
        span.assign_role(SpanRole::InstructionalModifier).unwrap();
        assert_eq!(span.role(), SpanRole::InstructionalModifier);

        let err = span.assign_role(SpanRole::PrimaryQuery).unwrap_err();
        assert_eq!(
            err,
            AttributionError::RoleAlreadyAssigned {
                current: SpanRole::InstructionalModifier,
                attempted: SpanRole::PrimaryQuery,
            }
        );
        assert_eq!(span.role(), SpanRole::InstructionalModifier);
    }

    #[test]
    fn test_transition_error_message() {
        let mut span = Span::new("What is X?", SpanClass::Interrogative);
        span.assign_role(SpanRole::PrimaryQuery).unwrap();
        let err = span.assign_role(SpanRole::ContextualBackground).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid role transition: PrimaryQuery -> ContextualBackground"
        );
    }

    #[test]
    fn test_same_role_twice_is_still_rejected() {
        let mut span = Span::new("x = 1", SpanClass::Assignment);
        span.assign_role(SpanRole::ContextualBackground).unwrap();
        assert!(span.assign_role(SpanRole::ContextualBackground).is_err());
    }

    #[test]
    fn test_cannot_assign_unassigned() {
        let mut span = Span::new("???", SpanClass::Unknown);
        assert_eq!(
            span.assign_role(SpanRole::Unassigned),
            Err(AttributionError::NonTerminalRole(SpanRole::Unassigned))
        );
    }

    #[test]
    fn test_class_does_not_constrain_role() {
        // An interrogative span may turn out to be pure background
        let mut span = Span::new("Who cares?", SpanClass::Interrogative);
        span.assign_role(SpanRole::ContextualBackground).unwrap();
        assert_eq!(span.span_class(), SpanClass::Interrogative);
    }

    #[test]
    fn test_fallback_class() {
        assert!(SpanClass::Unknown.is_fallback());
        assert_eq!(
            SpanClass::ALL.iter().filter(|c| c.is_fallback()).count(),
            1
        );
    }

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for class in SpanClass::ALL {
            assert_eq!(class.as_str().parse::<SpanClass>().unwrap(), class);
            assert_eq!(
                serde_json::to_string(&class).unwrap(),
                format!("\"{}\"", class)
            );
        }
        for role in SpanRole::ALL {
            assert_eq!(role.as_str().parse::<SpanRole>().unwrap(), role);
        }
        assert!("causal".parse::<SpanRole>().is_err());
    }

    #[test]
    fn test_span_json_without_role_defaults_to_unassigned() {
        let span: Span =
            serde_json::from_str(r#"{"text":"def f(): pass","span_class":"code_block"}"#).unwrap();
        assert_eq!(span.span_class(), SpanClass::CodeBlock);
        assert_eq!(span.role(), SpanRole::Unassigned);
    }
}
