use super::{DecisionMaker, Reduct, require_reducts};
use crate::config::Config;
use crate::error::{DrsaError, Result};
use crate::logging;
use crate::oracle::Oracle;
use crate::rule::Rule;
use crate::ruleset::{self, TieBreak};

/// Presents ranked candidates to an [`Oracle`] and returns its choice.
///
/// Exactly one interaction per `select` call. Answers that break the oracle
/// contract (out-of-range or unordered indices, an empty choice when one is
/// required) fail the round; there is no fallback to automated selection.
pub struct InteractiveDecisionMaker {
    oracle: Option<Box<dyn Oracle>>,
    tie_break: TieBreak,
    allow_empty: bool,
}

impl InteractiveDecisionMaker {
    pub fn new(oracle: impl Oracle + 'static) -> Self {
        Self::with_oracle(Some(Box::new(oracle)))
    }

    /// A maker with no oracle attached; every interaction fails.
    pub fn detached() -> Self {
        Self::with_oracle(None)
    }

    fn with_oracle(oracle: Option<Box<dyn Oracle>>) -> Self {
        Self {
            oracle,
            tie_break: TieBreak::default(),
            allow_empty: false,
        }
    }

    pub fn from_config(config: &Config, oracle: Option<Box<dyn Oracle>>) -> Self {
        Self {
            oracle,
            tie_break: config.automated.tie_break,
            allow_empty: config.interactive.allow_empty,
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Accept an empty choice (the user declined every candidate).
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    fn oracle(&self) -> Result<&dyn Oracle> {
        self.oracle
            .as_deref()
            .ok_or_else(|| DrsaError::Interaction("no interaction capability attached".into()))
    }

    fn check_picks(&self, picks: &[usize], candidates: usize) -> Result<()> {
        if picks.is_empty() && !self.allow_empty {
            return Err(DrsaError::Interaction("no rule was chosen".into()));
        }
        if let Some(&bad) = picks.iter().find(|&&i| i >= candidates) {
            return Err(DrsaError::Interaction(format!(
                "index {bad} out of range for {candidates} candidate(s)"
            )));
        }
        if picks.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DrsaError::Interaction(
                "choice must list candidates in presented order without repeats".into(),
            ));
        }
        Ok(())
    }
}

fn as_interaction(e: DrsaError) -> DrsaError {
    match e {
        DrsaError::Interaction(_) => e,
        other => DrsaError::Interaction(other.to_string()),
    }
}

impl DecisionMaker for InteractiveDecisionMaker {
    fn name(&self) -> &'static str {
        "interactive"
    }

    fn select(&self, rules: &[Rule]) -> Result<Vec<Rule>> {
        if rules.is_empty() {
            return Err(DrsaError::EmptyRuleSet);
        }
        let oracle = self.oracle()?;

        let candidates = ruleset::rank(rules, self.tie_break);
        let picks = oracle.present(&candidates).map_err(as_interaction)?;
        self.check_picks(&picks, candidates.len())?;

        log::debug!(
            "interactive choice {picks:?} among {} candidate(s)",
            candidates.len()
        );
        let chosen: Vec<Rule> = picks.into_iter().map(|i| candidates[i].clone()).collect();
        logging::log_selection(self.name(), &chosen);
        Ok(chosen)
    }

    /// A single reduct is returned without asking.
    fn select_reduct(&self, reducts: &[Reduct], core: &[usize]) -> Result<Reduct> {
        require_reducts(reducts)?;
        if let [only] = reducts {
            return Ok(only.clone());
        }
        let index = self
            .oracle()?
            .choose_reduct(reducts, core)
            .map_err(as_interaction)?;
        reducts.get(index).cloned().ok_or_else(|| {
            DrsaError::Interaction(format!(
                "reduct index {index} out of range for {} reduct(s)",
                reducts.len()
            ))
        })
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
