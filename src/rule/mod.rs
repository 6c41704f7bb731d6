//! The rule model: an immutable, validated dominance-based decision rule.
//!
//! Rules arrive from upstream induction as [`RuleSpec`] records (plain,
//! deserializable, literals still as strings) and become [`Rule`] values only
//! after passing a [`Validator`]. Nothing in this crate mutates a `Rule`.

pub mod explain;
pub mod types;

pub use explain::{check_explanation, render_conditions, render_explanation};
pub use types::{Certainty, Direction};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ValidationConfig;
use crate::error::{DrsaError, Result};

/// Unvalidated rule fields as produced by an upstream induction step.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuleSpec {
    /// Criterion index → threshold; a conjunction of bounds.
    pub conditions: BTreeMap<usize, f64>,
    /// Free-form antecedent text. Recovered from `explanation` when absent.
    #[serde(default)]
    pub condition_text: Option<String>,
    pub consequent: String,
    pub support: f64,
    pub confidence: f64,
    pub certainty: String,
    pub direction: String,
    pub explanation: String,
}

/// A validated decision rule. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    conditions: BTreeMap<usize, f64>,
    condition_text: String,
    consequent: String,
    support: f64,
    confidence: f64,
    certainty: Certainty,
    direction: Direction,
    explanation: String,
}

impl Rule {
    /// Validate `spec` with the default (strict) checks.
    pub fn new(spec: RuleSpec) -> Result<Self> {
        Validator::default().validate(spec)
    }

    /// Build a rule whose condition text and explanation are rendered from
    /// the structured fields.
    pub fn described(
        conditions: BTreeMap<usize, f64>,
        consequent: &str,
        support: f64,
        confidence: f64,
        certainty: Certainty,
        direction: Direction,
    ) -> Result<Self> {
        let (support, confidence) = (support + 0.0, confidence + 0.0);
        let explanation = render_explanation(
            &conditions,
            consequent,
            support,
            confidence,
            certainty,
            direction,
        );
        Rule::new(RuleSpec {
            condition_text: Some(render_conditions(&conditions, direction)),
            conditions,
            consequent: consequent.trim().to_string(),
            support,
            confidence,
            certainty: certainty.as_str().to_string(),
            direction: direction.as_str().to_string(),
            explanation,
        })
    }

    pub fn conditions(&self) -> &BTreeMap<usize, f64> {
        &self.conditions
    }

    pub fn condition_text(&self) -> &str {
        &self.condition_text
    }

    pub fn consequent(&self) -> &str {
        &self.consequent
    }

    pub fn support(&self) -> f64 {
        self.support
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn certainty(&self) -> Certainty {
        self.certainty
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn is_certain(&self) -> bool {
        self.certainty == Certainty::Certain
    }

    /// Whether `other` makes the same claim from a premise no stricter than
    /// this rule's, i.e. this rule adds nothing beside `other`.
    pub fn is_subsumed_by(&self, other: &Rule) -> bool {
        if self.consequent != other.consequent || self.direction != other.direction {
            return false;
        }
        other.conditions.iter().all(|(idx, theirs)| {
            self.conditions
                .get(idx)
                .is_some_and(|ours| self.direction.weaker_or_equal(*theirs, *ours))
        })
    }

    /// Re-run the explanation consistency check on a constructed rule.
    pub fn check_explanation(&self) -> Result<()> {
        check_explanation(
            &self.explanation,
            self.conditions.len(),
            &self.consequent,
            self.support,
            self.confidence,
            self.certainty,
        )
    }
}

impl TryFrom<RuleSpec> for Rule {
    type Error = DrsaError;

    fn try_from(spec: RuleSpec) -> Result<Self> {
        Rule::new(spec)
    }
}

/// Turns [`RuleSpec`]s into [`Rule`]s under a given [`ValidationConfig`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Accepts certain rules whose confidence is below 1.0 (with a warning).
    ///
    /// Some producers tag lower-approximation rules as certain while
    /// reporting the confidence measured on the full data set.
    pub fn lenient() -> Self {
        Self::new(ValidationConfig {
            certain_requires_full_confidence: false,
            ..ValidationConfig::default()
        })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(&self, mut spec: RuleSpec) -> Result<Rule> {
        // -0.0 would sort below 0.0 and break ties that should hold
        spec.support += 0.0;
        spec.confidence += 0.0;
        if spec.conditions.is_empty() {
            return Err(DrsaError::validation("conditions", "must not be empty"));
        }
        if let Some((idx, threshold)) = spec.conditions.iter().find(|(_, t)| !t.is_finite()) {
            return Err(DrsaError::validation(
                "conditions",
                format!("threshold for criterion {idx} is not finite: {threshold}"),
            ));
        }
        if spec.consequent.trim().is_empty() {
            return Err(DrsaError::validation("consequent", "must not be empty"));
        }
        check_fraction("support", spec.support)?;
        check_fraction("confidence", spec.confidence)?;

        let certainty: Certainty = spec.certainty.parse()?;
        let direction: Direction = spec.direction.parse()?;

        if certainty == Certainty::Certain
            && (1.0 - spec.confidence).abs() > self.config.tolerance
        {
            if self.config.certain_requires_full_confidence {
                return Err(DrsaError::validation(
                    "confidence",
                    format!("certain rule must have confidence 1.0, got {}", spec.confidence),
                ));
            }
            log::warn!(
                "accepting certain rule with confidence {}: {}",
                spec.confidence,
                spec.explanation
            );
        }

        if spec.explanation.trim().is_empty() {
            return Err(DrsaError::validation("explanation", "must not be empty"));
        }
        if self.config.check_explanation {
            check_explanation(
                &spec.explanation,
                spec.conditions.len(),
                &spec.consequent,
                spec.support,
                spec.confidence,
                certainty,
            )?;
        }

        let condition_text = match spec.condition_text {
            Some(text) if !text.trim().is_empty() => text,
            _ => explain::antecedent_span(&spec.explanation)
                .map(str::to_string)
                .unwrap_or_else(|| render_conditions(&spec.conditions, direction)),
        };

        Ok(Rule {
            conditions: spec.conditions,
            condition_text,
            consequent: spec.consequent,
            support: spec.support,
            confidence: spec.confidence,
            certainty,
            direction,
            explanation: spec.explanation,
        })
    }

    /// Validate a whole batch, stopping at the first invalid rule.
    pub fn validate_all(&self, specs: impl IntoIterator<Item = RuleSpec>) -> Result<Vec<Rule>> {
        specs.into_iter().map(|spec| self.validate(spec)).collect()
    }
}

fn check_fraction(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DrsaError::validation(
            field,
            format!("must lie in [0, 1], got {value}"),
        ))
    }
}
