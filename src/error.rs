//! Error taxonomy shared by rule construction and every decision maker.

use thiserror::Error;

/// Result type for rule construction and selection.
pub type Result<T> = std::result::Result<T, DrsaError>;

/// Everything that can abort a construction or a decision round.
///
/// None of these are retried or swallowed internally; the caller owns the
/// decision round and may retry it with corrected input or another strategy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrsaError {
    /// A rule field violates its invariants.
    #[error("invalid rule field `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// `select` was called without candidate rules.
    #[error("no candidate rules to select from")]
    EmptyRuleSet,

    /// The interactive collaborator failed, is missing, or broke its contract.
    #[error("interaction failed: {0}")]
    Interaction(String),

    /// The bare decision-maker contract was invoked directly.
    #[error("{0} is not implemented by the base decision maker")]
    NotImplemented(&'static str),
}

impl DrsaError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        DrsaError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Short machine-friendly kind, used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            DrsaError::Validation { .. } => "validation",
            DrsaError::EmptyRuleSet => "empty_rule_set",
            DrsaError::Interaction(_) => "interaction",
            DrsaError::NotImplemented(_) => "not_implemented",
        }
    }
}
