//! Decision makers: strategies that narrow a rule set to the chosen rules.
//!
//! Every strategy implements [`DecisionMaker`]. The contract is the same for
//! all of them: take the candidate rules as supplied, return an ordered
//! selection, never touch the input.

/// Deterministic selection without external input.
pub mod automated;
/// Selection deferred to an [`Oracle`](crate::oracle::Oracle).
pub mod interactive;

pub use automated::AutomatedDecisionMaker;
pub use interactive::InteractiveDecisionMaker;

use std::fmt;

use crate::config::{Config, Strategy};
use crate::error::{DrsaError, Result};
use crate::oracle::Oracle;
use crate::rule::Rule;

/// A minimal subset of criteria preserving the quality of approximation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reduct {
    criteria: Vec<usize>,
}

impl Reduct {
    pub fn new(criteria: Vec<usize>) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &[usize] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl From<Vec<usize>> for Reduct {
    fn from(criteria: Vec<usize>) -> Self {
        Self::new(criteria)
    }
}

impl fmt::Display for Reduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.criteria.iter().map(|c| c.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Trait for decision-making strategies.
///
/// Implementations must not keep per-call mutable state: independent rule
/// sets may be decided concurrently by one maker.
pub trait DecisionMaker: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Narrow or reorder `rules` into the chosen, ordered selection.
    fn select(&self, rules: &[Rule]) -> Result<Vec<Rule>>;

    /// Pick the reduct whose criteria the next round should use.
    fn select_reduct(&self, reducts: &[Reduct], core: &[usize]) -> Result<Reduct>;

    /// Whether this maker consults an external actor.
    fn is_interactive(&self) -> bool {
        false
    }
}

/// The bare contract with no strategy behind it. Every call fails with
/// [`DrsaError::NotImplemented`], whatever the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseDecisionMaker;

impl DecisionMaker for BaseDecisionMaker {
    fn name(&self) -> &'static str {
        "base"
    }

    fn select(&self, _rules: &[Rule]) -> Result<Vec<Rule>> {
        Err(DrsaError::NotImplemented("select"))
    }

    fn select_reduct(&self, _reducts: &[Reduct], _core: &[usize]) -> Result<Reduct> {
        Err(DrsaError::NotImplemented("select_reduct"))
    }
}

/// Build the configured strategy.
///
/// `oracle` is only used by the interactive strategy; without one the
/// interactive maker fails each round with an interaction error.
pub fn from_config(config: &Config, oracle: Option<Box<dyn Oracle>>) -> Box<dyn DecisionMaker> {
    match config.settings.strategy {
        Strategy::Automated => Box::new(AutomatedDecisionMaker::from_config(&config.automated)),
        Strategy::Interactive => Box::new(InteractiveDecisionMaker::from_config(config, oracle)),
    }
}

pub(crate) fn require_reducts(reducts: &[Reduct]) -> Result<()> {
    if reducts.is_empty() {
        Err(DrsaError::validation("reducts", "no reducts to choose from"))
    } else {
        Ok(())
    }
}
