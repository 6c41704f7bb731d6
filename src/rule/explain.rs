//! Rendering rule sentences and checking precomputed ones against the
//! structured fields.
//!
//! The canonical sentence is
//! `[CERTAIN] IF f_1 >= 1.0 AND f_2 >= 2.0 THEN d >= 2 (support=0.50, confidence=0.90)`.

use std::collections::BTreeMap;

use super::types::{Certainty, Direction};
use crate::error::{DrsaError, Result};

/// Render the conjunctive antecedent with one-based criterion names.
pub fn render_conditions(conditions: &BTreeMap<usize, f64>, direction: Direction) -> String {
    conditions
        .iter()
        .map(|(idx, threshold)| format!("f_{} {} {threshold:?}", idx + 1, direction.operator()))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Render the full explanation sentence for a rule.
pub fn render_explanation(
    conditions: &BTreeMap<usize, f64>,
    consequent: &str,
    support: f64,
    confidence: f64,
    certainty: Certainty,
    direction: Direction,
) -> String {
    format!(
        "[{}] IF {} THEN {} {}",
        certainty.label(),
        render_conditions(conditions, direction),
        consequent.trim(),
        statistics_suffix(support, confidence),
    )
}

fn statistics_suffix(support: f64, confidence: f64) -> String {
    format!("(support={support:.2}, confidence={confidence:.2})")
}

/// The text between `IF` and `THEN`, if the sentence has that shape.
pub(crate) fn antecedent_span(explanation: &str) -> Option<&str> {
    let start = explanation.find("IF ")? + 3;
    let end = explanation[start..].find(" THEN ")? + start;
    Some(explanation[start..end].trim())
}

fn squash(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check that a precomputed explanation agrees with the structured fields.
///
/// Criterion names are not compared: upstream producers disagree on whether
/// they are zero- or one-based. The certainty tag, the number of conjuncts,
/// the consequent (ignoring whitespace) and the two-decimal statistics must
/// all match.
pub fn check_explanation(
    explanation: &str,
    condition_count: usize,
    consequent: &str,
    support: f64,
    confidence: f64,
    certainty: Certainty,
) -> Result<()> {
    let text = explanation.trim();
    let tag = format!("[{}]", certainty.label());
    let Some(body) = text.strip_prefix(tag.as_str()) else {
        return Err(DrsaError::validation(
            "explanation",
            format!("expected to start with {tag}"),
        ));
    };

    let Some(antecedent) = antecedent_span(body) else {
        return Err(DrsaError::validation(
            "explanation",
            "expected an `IF ... THEN ...` sentence",
        ));
    };
    let conjuncts = antecedent
        .split(" AND ")
        .filter(|c| !c.trim().is_empty())
        .count();
    if conjuncts != condition_count {
        return Err(DrsaError::validation(
            "explanation",
            format!("lists {conjuncts} condition(s), rule has {condition_count}"),
        ));
    }

    let suffix = statistics_suffix(support, confidence);
    let Some(head) = text.strip_suffix(suffix.as_str()) else {
        return Err(DrsaError::validation(
            "explanation",
            format!("expected to end with {suffix}"),
        ));
    };

    // head ends with "... THEN <consequent> "
    let stated = head
        .rfind(" THEN ")
        .map(|pos| &head[pos + 6..])
        .unwrap_or_default();
    if squash(stated) != squash(consequent) {
        return Err(DrsaError::validation(
            "explanation",
            format!(
                "states consequent {:?}, rule has {:?}",
                stated.trim(),
                consequent.trim()
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(pairs: &[(usize, f64)]) -> BTreeMap<usize, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn render_matches_canonical_sentence() {
        let text = render_explanation(
            &conditions(&[(0, 1.0), (1, 2.0)]),
            "d >= 2",
            0.5,
            0.9,
            Certainty::Certain,
            Direction::Up,
        );
        assert_eq!(
            text,
            "[CERTAIN] IF f_1 >= 1.0 AND f_2 >= 2.0 THEN d >= 2 (support=0.50, confidence=0.90)"
        );
    }

    #[test]
    fn render_down_uses_upper_bound() {
        let text = render_conditions(&conditions(&[(2, 0.25)]), Direction::Down);
        assert_eq!(text, "f_3 <= 0.25");
    }

    #[test]
    fn antecedent_span_extracts_conjunction() {
        let span = antecedent_span("[POSSIBLE] IF f_0 >= 0.5 AND f_1 >= 1.5 THEN d >= 2 (x)");
        assert_eq!(span, Some("f_0 >= 0.5 AND f_1 >= 1.5"));
        assert_eq!(antecedent_span("no sentence here"), None);
    }

    #[test]
    fn check_accepts_fixture_sentences() {
        check_explanation(
            "[CERTAIN] IF f_1 >= 1.0 AND f_2 >= 2.0 THEN d >= 2 (support=0.50, confidence=0.90)",
            2,
            "d>=2",
            0.5,
            0.9,
            Certainty::Certain,
        )
        .unwrap();
        check_explanation(
            "[POSSIBLE] IF f_0 >= 0.5 AND f_1 >= 1.5 THEN d >= 2 (support=0.30, confidence=0.70)",
            2,
            "d>=2",
            0.3,
            0.7,
            Certainty::Possible,
        )
        .unwrap();
    }

    #[test]
    fn check_rejects_wrong_tag() {
        let err = check_explanation(
            "[POSSIBLE] IF f_1 >= 1.0 THEN d >= 2 (support=0.50, confidence=0.90)",
            1,
            "d >= 2",
            0.5,
            0.9,
            Certainty::Certain,
        )
        .unwrap_err();
        assert!(err.to_string().contains("[CERTAIN]"));
    }

    #[test]
    fn check_rejects_stale_statistics() {
        let err = check_explanation(
            "[CERTAIN] IF f_1 >= 1.0 THEN d >= 2 (support=0.40, confidence=1.00)",
            1,
            "d >= 2",
            0.5,
            1.0,
            Certainty::Certain,
        )
        .unwrap_err();
        assert!(err.to_string().contains("support=0.50"));
    }

    #[test]
    fn check_rejects_condition_count_mismatch() {
        let err = check_explanation(
            "[CERTAIN] IF f_1 >= 1.0 THEN d >= 2 (support=0.50, confidence=1.00)",
            2,
            "d >= 2",
            0.5,
            1.0,
            Certainty::Certain,
        )
        .unwrap_err();
        assert!(err.to_string().contains("1 condition(s)"));
    }

    #[test]
    fn check_rejects_other_consequent() {
        let err = check_explanation(
            "[CERTAIN] IF f_1 >= 1.0 THEN d >= 3 (support=0.50, confidence=1.00)",
            1,
            "d >= 2",
            0.5,
            1.0,
            Certainty::Certain,
        )
        .unwrap_err();
        assert!(err.to_string().contains("consequent"));
    }
}
