//! drsa-select: choose and explain dominance-based rough set (DRSA) decision rules.
//!
//! Rules induced upstream arrive as [`rule::RuleSpec`] records and are
//! validated into immutable [`rule::Rule`] values. A [`maker::DecisionMaker`]
//! then narrows the rule set to the chosen rules, either on its own
//! ([`maker::AutomatedDecisionMaker`]) or by asking an
//! [`oracle::Oracle`] ([`maker::InteractiveDecisionMaker`]). The chosen
//! rules' explanations are rendered with [`ruleset::explain_rules`].
//!
//! # Architecture
//!
//! - **[`rule`]**: Rule model, literals, validation, explanation rendering and checks.
//! - **[`ruleset`]**: Pure operations over rule collections (ranking, filters, explanations).
//! - **[`maker`]**: Decision-maker contract and the automated/interactive strategies.
//! - **[`oracle`]**: The interactive collaborator, with a console prompt and scripted stand-ins.
//! - **[`config`]**: Embedded defaults merged with the user overlay.
//! - **[`logging`]**: Logger setup and per-round selection records.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Error taxonomy for construction and selection.
pub mod error;
/// Logger initialisation and selection records.
pub mod logging;
/// Decision makers: base contract, automated and interactive strategies.
pub mod maker;
/// Interactive collaborators that choose among presented candidates.
pub mod oracle;
/// Rule model and validation.
pub mod rule;
/// Ranking, filtering, and explaining rule collections.
pub mod ruleset;

pub use error::{DrsaError, Result};

use rule::Rule;

/// Select from `rules` with the embedded default configuration.
///
/// This is the main entry point for tests and simple usage.
/// For interactive use or a user config, build the maker with [`maker::from_config`].
pub fn select_with_defaults(rules: &[Rule]) -> Result<Vec<Rule>> {
    let config = config::Config::default_config();
    let maker = maker::from_config(&config, None);
    maker.select(rules)
}
