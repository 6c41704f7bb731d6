//! Pure operations over rule collections: ranking, filtering, narrowing.
//!
//! Every function here borrows its input and returns a new vector; the
//! caller's rules are never reordered or modified in place.

/// Explanation output for chosen rules.
pub mod render;

pub use render::{explain_rules, numbered_listing, write_explanations};

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::rule::{Certainty, Rule};

/// How rules with equal confidence and equal support are ordered.
///
/// Every variant falls back to the input order, so ranking is always stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order in which the rules were supplied.
    #[default]
    InputOrder,
    /// Certain rules before possible ones.
    CertainFirst,
    /// Rules with fewer conditions (more general premises) first.
    FewerConditions,
}

impl TieBreak {
    fn compare(self, a: &Rule, b: &Rule) -> Ordering {
        match self {
            TieBreak::InputOrder => Ordering::Equal,
            TieBreak::CertainFirst => a.certainty().cmp(&b.certainty()),
            TieBreak::FewerConditions => a.conditions().len().cmp(&b.conditions().len()),
        }
    }
}

/// Strength ordering: confidence descending, then support descending.
pub fn compare_strength(a: &Rule, b: &Rule) -> Ordering {
    b.confidence()
        .total_cmp(&a.confidence())
        .then_with(|| b.support().total_cmp(&a.support()))
}

/// Indices of `rules` in best-first order.
pub fn rank_indices(rules: &[Rule], tie_break: TieBreak) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rules.len()).collect();
    // sort_by is stable: equal keys keep input order
    order.sort_by(|&i, &j| {
        compare_strength(&rules[i], &rules[j]).then_with(|| tie_break.compare(&rules[i], &rules[j]))
    });
    order
}

/// Rules in best-first order.
pub fn rank(rules: &[Rule], tie_break: TieBreak) -> Vec<Rule> {
    rank_indices(rules, tie_break)
        .into_iter()
        .map(|i| rules[i].clone())
        .collect()
}

/// Rules with the given certainty, in input order.
pub fn filter_certainty(rules: &[Rule], certainty: Certainty) -> Vec<Rule> {
    rules
        .iter()
        .filter(|r| r.certainty() == certainty)
        .cloned()
        .collect()
}

/// Certain rules if there are any, otherwise every rule.
fn certain_or_all(rules: &[Rule]) -> Vec<Rule> {
    let certain = filter_certainty(rules, Certainty::Certain);
    if certain.is_empty() {
        log::debug!("no certain rules among {}, scoring all of them", rules.len());
        rules.to_vec()
    } else {
        certain
    }
}

/// Blend of confidence and support used by [`weighted_top_k`].
pub fn weighted_score(rule: &Rule, alpha: f64) -> f64 {
    alpha * rule.confidence() + (1.0 - alpha) * rule.support()
}

/// The `k` best rules by `alpha * confidence + (1 - alpha) * support`.
///
/// Only certain rules compete when at least one is present. `k == 0` keeps
/// every competing rule. Equal scores keep input order.
pub fn weighted_top_k(rules: &[Rule], alpha: f64, k: usize) -> Vec<Rule> {
    let mut pool = certain_or_all(rules);
    pool.sort_by(|a, b| weighted_score(b, alpha).total_cmp(&weighted_score(a, alpha)));
    if k > 0 {
        pool.truncate(k);
    }
    pool
}

/// Rules not dominated in (support, confidence) by another competing rule,
/// in best-first order.
///
/// Only certain rules compete when at least one is present.
pub fn pareto_front(rules: &[Rule]) -> Vec<Rule> {
    let pool = certain_or_all(rules);
    let front: Vec<Rule> = pool
        .iter()
        .filter(|r| !pool.iter().any(|other| dominates(other, r)))
        .cloned()
        .collect();
    rank(&front, TieBreak::InputOrder)
}

fn dominates(a: &Rule, b: &Rule) -> bool {
    a.support() >= b.support()
        && a.confidence() >= b.confidence()
        && (a.support() > b.support() || a.confidence() > b.confidence())
}

/// Drop rules subsumed by another rule in the set.
///
/// Of several rules with equivalent premises only the first is kept.
pub fn minimal(rules: &[Rule]) -> Vec<Rule> {
    rules
        .iter()
        .enumerate()
        .filter(|&(i, rule)| {
            !rules.iter().enumerate().any(|(j, other)| {
                j != i && rule.is_subsumed_by(other) && !(j > i && other.is_subsumed_by(rule))
            })
        })
        .map(|(_, rule)| rule.clone())
        .collect()
}
