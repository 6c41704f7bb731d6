use super::{DecisionMaker, Reduct, require_reducts};
use crate::config::{AutomatedConfig, Policy};
use crate::error::{DrsaError, Result};
use crate::logging;
use crate::rule::Rule;
use crate::ruleset::{self, TieBreak};

/// Narrows a rule set by strength alone.
///
/// With the default [`Policy::Ranked`] every rule is kept, ordered by
/// confidence, then support, then the tie-break policy. The other policies
/// keep fewer rules but never return an empty selection for non-empty input.
#[derive(Debug, Clone)]
pub struct AutomatedDecisionMaker {
    policy: Policy,
    tie_break: TieBreak,
    top_k: usize,
    alpha: f64,
    k: usize,
}

impl Default for AutomatedDecisionMaker {
    fn default() -> Self {
        Self::from_config(&AutomatedConfig::default())
    }
}

impl AutomatedDecisionMaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AutomatedConfig) -> Self {
        Self {
            policy: config.policy,
            tie_break: config.tie_break,
            top_k: config.top_k,
            alpha: config.weighted.alpha,
            k: config.weighted.k,
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Keep at most `top_k` rules; 0 keeps all.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Weight and size of the weighted policy.
    pub fn with_weights(mut self, alpha: f64, k: usize) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.k = k;
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }
}

impl DecisionMaker for AutomatedDecisionMaker {
    fn name(&self) -> &'static str {
        "automated"
    }

    fn select(&self, rules: &[Rule]) -> Result<Vec<Rule>> {
        if rules.is_empty() {
            return Err(DrsaError::EmptyRuleSet);
        }

        let mut chosen = match self.policy {
            Policy::Ranked => ruleset::rank(rules, self.tie_break),
            Policy::Weighted => ruleset::weighted_top_k(rules, self.alpha, self.k),
            Policy::Pareto => ruleset::rank(&ruleset::pareto_front(rules), self.tie_break),
        };
        if self.top_k > 0 {
            chosen.truncate(self.top_k);
        }

        log::debug!(
            "automated ({:?}) kept {} of {} rule(s)",
            self.policy,
            chosen.len(),
            rules.len()
        );
        logging::log_selection(self.name(), &chosen);
        Ok(chosen)
    }

    /// The smallest reduct; the first one among equally small reducts.
    fn select_reduct(&self, reducts: &[Reduct], _core: &[usize]) -> Result<Reduct> {
        require_reducts(reducts)?;
        let (_, best) = reducts
            .iter()
            .enumerate()
            .min_by_key(|(i, r)| (r.len(), *i))
            .ok_or_else(|| DrsaError::validation("reducts", "no reducts to choose from"))?;
        Ok(best.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Certainty;
    use crate::ruleset::fixtures::{certain, possible, rule};

    #[test]
    fn empty_input_fails() {
        let maker = AutomatedDecisionMaker::new();
        assert_eq!(maker.select(&[]).unwrap_err(), DrsaError::EmptyRuleSet);
    }

    #[test]
    fn ranked_keeps_all_best_first() {
        let rules = vec![possible(0.3, 0.7), certain(0.2)];
        let chosen = AutomatedDecisionMaker::new().select(&rules).unwrap();
        assert_eq!(chosen, vec![rules[1].clone(), rules[0].clone()]);
    }

    #[test]
    fn input_is_left_untouched() {
        let rules = vec![possible(0.3, 0.7), certain(0.2)];
        let before = rules.clone();
        AutomatedDecisionMaker::new().select(&rules).unwrap();
        assert_eq!(rules, before);
    }

    #[test]
    fn top_k_truncates_ranking() {
        let rules = vec![possible(0.3, 0.7), certain(0.2), possible(0.1, 0.9)];
        let chosen = AutomatedDecisionMaker::new()
            .with_top_k(1)
            .select(&rules)
            .unwrap();
        assert_eq!(chosen, vec![rules[1].clone()]);
    }

    #[test]
    fn weighted_policy_prefers_certain_rules() {
        let rules = vec![possible(0.9, 0.95), certain(0.2)];
        let chosen = AutomatedDecisionMaker::new()
            .with_policy(Policy::Weighted)
            .select(&rules)
            .unwrap();
        assert_eq!(chosen, vec![rules[1].clone()]);
    }

    #[test]
    fn weighted_policy_never_empty() {
        let rules = vec![possible(0.1, 0.4)];
        let chosen = AutomatedDecisionMaker::new()
            .with_policy(Policy::Weighted)
            .select(&rules)
            .unwrap();
        assert_eq!(chosen.len(), 1);
    }

    #[test]
    fn pareto_policy_respects_tie_break() {
        let long = rule(&[(0, 1.0), (1, 1.0)], 0.4, 1.0, Certainty::Certain);
        let short = rule(&[(2, 1.0)], 0.4, 1.0, Certainty::Certain);
        let dominated = rule(&[(3, 1.0)], 0.1, 1.0, Certainty::Certain);
        let chosen = AutomatedDecisionMaker::new()
            .with_policy(Policy::Pareto)
            .with_tie_break(TieBreak::FewerConditions)
            .select(&[long.clone(), dominated, short.clone()])
            .unwrap();
        assert_eq!(chosen, vec![short, long]);
    }

    #[test]
    fn shortest_reduct_wins() {
        let reducts = vec![
            Reduct::new(vec![0, 1]),
            Reduct::new(vec![2]),
            Reduct::new(vec![3]),
        ];
        let chosen = AutomatedDecisionMaker::new()
            .select_reduct(&reducts, &[])
            .unwrap();
        assert_eq!(chosen, Reduct::new(vec![2]));
    }

    #[test]
    fn no_reducts_fails() {
        let err = AutomatedDecisionMaker::new()
            .select_reduct(&[], &[])
            .unwrap_err();
        assert!(matches!(err, DrsaError::Validation { field: "reducts", .. }));
    }
}
