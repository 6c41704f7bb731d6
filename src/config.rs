use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ruleset::TieBreak;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub automated: AutomatedConfig,
    #[serde(default)]
    pub interactive: InteractiveConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub strategy: Strategy,
}

/// Which decision maker the application builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Automated,
    Interactive,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Automated => "automated",
            Strategy::Interactive => "interactive",
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "automated" => Ok(Strategy::Automated),
            "interactive" => Ok(Strategy::Interactive),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Strictness of rule construction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Reject certain rules whose confidence is not 1.0.
    #[serde(default = "default_true")]
    pub certain_requires_full_confidence: bool,
    /// Check precomputed explanations against the structured fields.
    #[serde(default = "default_true")]
    pub check_explanation: bool,
    /// Allowed distance from 1.0 for a certain rule's confidence.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            certain_requires_full_confidence: true,
            check_explanation: true,
            tolerance: default_tolerance(),
        }
    }
}

/// Scoring policy of the automated decision maker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Confidence, then support, then the tie-break policy.
    #[default]
    Ranked,
    /// Weighted blend of confidence and support over certain rules.
    Weighted,
    /// Certain rules not dominated in (support, confidence).
    Pareto,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct AutomatedConfig {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub tie_break: TieBreak,
    /// Maximum number of rules returned; 0 keeps all.
    #[serde(default)]
    pub top_k: usize,
    #[serde(default)]
    pub weighted: WeightedConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeightedConfig {
    /// Weight of confidence against support, in [0, 1].
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Number of rules kept by the weighted policy.
    #[serde(default = "default_k")]
    pub k: usize,
}

impl Default for WeightedConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            k: default_k(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct InteractiveConfig {
    /// Accept an empty choice from the interactive collaborator.
    #[serde(default)]
    pub allow_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log file path; `~` and environment variables are expanded.
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_log_file(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tolerance() -> f64 {
    1e-9
}

fn default_alpha() -> f64 {
    0.7
}

fn default_k() -> usize {
    5
}

fn default_level() -> String {
    "info".into()
}

fn default_log_file() -> String {
    "~/.local/share/drsa-select/drsa-select.log".into()
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    validation: ValidationOverlay,
    #[serde(default)]
    automated: AutomatedOverlay,
    #[serde(default)]
    interactive: InteractiveOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    strategy: Option<Strategy>,
}

#[derive(Debug, Deserialize, Default)]
struct ValidationOverlay {
    certain_requires_full_confidence: Option<bool>,
    check_explanation: Option<bool>,
    tolerance: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct AutomatedOverlay {
    policy: Option<Policy>,
    tie_break: Option<TieBreak>,
    top_k: Option<usize>,
    #[serde(default)]
    weighted: WeightedOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct WeightedOverlay {
    alpha: Option<f64>,
    k: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
struct InteractiveOverlay {
    allow_empty: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    level: Option<String>,
    file: Option<String>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/drsa-select/config.toml (if exists)
    ///
    /// Scalars present in the overlay replace the defaults; absent ones keep them.
    /// Problems with the overlay are logged; see [`Config::read`] to get them back.
    pub fn load() -> Self {
        let (config, warnings) = Self::read();
        report(&warnings);
        config
    }

    /// Like [`Config::load`], but hands back the overlay problems instead of
    /// logging them, for callers that install the logger from the result.
    pub fn read() -> (Self, Vec<String>) {
        let Some(home) = std::env::var_os("HOME") else {
            return (Self::default_config(), Vec::new());
        };
        Self::read_from(&Path::new(&home).join(".config/drsa-select/config.toml"))
    }

    /// Embedded defaults merged with the overlay at `path`, if readable.
    ///
    /// A malformed overlay is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let (config, warnings) = Self::read_from(path);
        report(&warnings);
        config
    }

    /// Embedded defaults merged with the overlay at `path`, plus one message
    /// per ignored overlay or overlay value.
    pub fn read_from(path: &Path) -> (Self, Vec<String>) {
        let mut config = Self::default_config();
        let Ok(content) = std::fs::read_to_string(path) else {
            return (config, Vec::new());
        };
        let warnings = match toml::from_str::<ConfigOverlay>(&content) {
            Ok(overlay) => config.apply_overlay(overlay),
            Err(e) => vec![format!("config parse error in {}: {e}", path.display())],
        };
        (config, warnings)
    }

    /// Apply an overlay on top of this config (merge semantics).
    /// Returns a message for each overlay value that was ignored.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(v) = overlay.settings.strategy {
            self.settings.strategy = v;
        }

        let v = overlay.validation;
        if let Some(b) = v.certain_requires_full_confidence {
            self.validation.certain_requires_full_confidence = b;
        }
        if let Some(b) = v.check_explanation {
            self.validation.check_explanation = b;
        }
        if let Some(t) = v.tolerance {
            if t.is_finite() && t >= 0.0 {
                self.validation.tolerance = t;
            } else {
                warnings.push(format!(
                    "ignoring validation.tolerance = {t}: must be a non-negative number"
                ));
            }
        }

        let a = overlay.automated;
        if let Some(p) = a.policy {
            self.automated.policy = p;
        }
        if let Some(tb) = a.tie_break {
            self.automated.tie_break = tb;
        }
        if let Some(k) = a.top_k {
            self.automated.top_k = k;
        }
        if let Some(alpha) = a.weighted.alpha {
            if (0.0..=1.0).contains(&alpha) {
                self.automated.weighted.alpha = alpha;
            } else {
                warnings.push(format!(
                    "ignoring automated.weighted.alpha = {alpha}: must lie in [0, 1]"
                ));
            }
        }
        if let Some(k) = a.weighted.k {
            self.automated.weighted.k = k;
        }

        if let Some(b) = overlay.interactive.allow_empty {
            self.interactive.allow_empty = b;
        }

        let l = overlay.logging;
        if let Some(level) = l.level {
            self.logging.level = level;
        }
        if let Some(file) = l.file {
            self.logging.file = file;
        }
        warnings
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    pub(crate) fn apply_overlay_str(&mut self, toml_str: &str) -> Vec<String> {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay)
    }
}

/// Send overlay problems to the log.
pub fn report(warnings: &[String]) {
    for warning in warnings {
        log::warn!("{warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert_eq!(config.settings.strategy, Strategy::Automated);
        assert_eq!(config.automated.policy, Policy::Ranked);
        assert_eq!(config.automated.tie_break, TieBreak::InputOrder);
        assert_eq!(config.automated.top_k, 0);
        assert!(!config.interactive.allow_empty);
    }

    #[test]
    fn embedded_defaults_match_type_defaults() {
        assert_eq!(Config::default_config(), Config::default());
    }

    #[test]
    fn default_validation_is_strict() {
        let config = Config::default_config();
        assert!(config.validation.certain_requires_full_confidence);
        assert!(config.validation.check_explanation);
    }

    // ── Merge semantics ──

    #[test]
    fn overlay_switches_strategy() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            strategy = "interactive"
        "#,
        );
        assert_eq!(config.settings.strategy, Strategy::Interactive);
    }

    #[test]
    fn overlay_sets_policy_and_keeps_weights() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [automated]
            policy = "weighted"
            tie_break = "certain_first"
        "#,
        );
        assert_eq!(config.automated.policy, Policy::Weighted);
        assert_eq!(config.automated.tie_break, TieBreak::CertainFirst);
        // Weighted section not in overlay keeps defaults
        assert_eq!(config.automated.weighted.alpha, 0.7);
        assert_eq!(config.automated.weighted.k, 5);
    }

    #[test]
    fn overlay_nested_weighted_section() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [automated.weighted]
            alpha = 0.5
        "#,
        );
        assert_eq!(config.automated.weighted.alpha, 0.5);
        assert_eq!(config.automated.weighted.k, 5);
        assert_eq!(config.automated.policy, Policy::Ranked);
    }

    #[test]
    fn overlay_rejects_out_of_range_alpha() {
        let mut config = Config::default_config();
        let warnings = config.apply_overlay_str(
            r#"
            [automated.weighted]
            alpha = 1.5
        "#,
        );
        assert_eq!(config.automated.weighted.alpha, 0.7);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn overlay_relaxes_validation() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [validation]
            certain_requires_full_confidence = false
        "#,
        );
        assert!(!config.validation.certain_requires_full_confidence);
        assert!(config.validation.check_explanation);
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert_eq!(config, Config::default_config());
    }

    #[test]
    fn load_from_reads_overlay_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[interactive]\nallow_empty = true").unwrap();
        let config = Config::load_from(file.path());
        assert!(config.interactive.allow_empty);
    }

    #[test]
    fn load_from_ignores_malformed_overlay() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\nstrategy = \"telepathic\"").unwrap();
        let config = Config::load_from(file.path());
        assert_eq!(config, Config::default_config());
    }

    #[test]
    fn read_from_reports_malformed_overlay() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\nstrategy = \"telepathic\"").unwrap();
        let (config, warnings) = Config::read_from(file.path());
        assert_eq!(config, Config::default_config());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("config parse error in "));
        assert!(warnings[0].contains("telepathic"));
    }

    #[test]
    fn read_from_reports_ignored_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[validation]\ntolerance = -1.0\n[interactive]\nallow_empty = true").unwrap();
        let (config, warnings) = Config::read_from(file.path());
        assert!(config.interactive.allow_empty);
        assert_eq!(config.validation.tolerance, 1e-9);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("validation.tolerance"));
    }

    #[test]
    fn read_from_clean_overlay_has_no_warnings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[automated]\npolicy = \"pareto\"").unwrap();
        let (config, warnings) = Config::read_from(file.path());
        assert_eq!(config.automated.policy, Policy::Pareto);
        assert!(warnings.is_empty());
    }

    #[test]
    fn overlay_raises_tolerance() {
        let mut config = Config::default_config();
        let warnings = config.apply_overlay_str(
            r#"
            [validation]
            tolerance = 1e-3
        "#,
        );
        assert!(warnings.is_empty());
        assert_eq!(config.validation.tolerance, 1e-3);
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default_config());
    }
}
