use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::config::LoggingConfig;
use crate::rule::Rule;

/// Log target for per-round selection records.
pub const SELECTION_TARGET: &str = "selection";

/// Install the global logger: append to the configured file, or fall back to
/// stderr when it cannot be opened.
///
/// Best-effort: failures are silently ignored (logging must never block a
/// decision). Returns the file being written, if any.
pub fn init(config: &LoggingConfig) -> Option<PathBuf> {
    let level = level_filter(&config.level);
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    match open_log_file(config) {
        Some((path, file)) => {
            let _ = WriteLogger::init(level, log_config, file);
            Some(path)
        }
        None => {
            let _ = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto);
            None
        }
    }
}

/// Open the configured log file for appending, creating its directory.
/// `None` sends logging to stderr instead.
pub fn open_log_file(config: &LoggingConfig) -> Option<(PathBuf, File)> {
    let path = log_path(config)?;
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;
    Some((path, file))
}

/// Parse a level name; unknown names mean `info`.
pub fn level_filter(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// The configured log file with `~` and environment variables expanded.
pub fn log_path(config: &LoggingConfig) -> Option<PathBuf> {
    let file = config.file.trim();
    if file.is_empty() {
        return None;
    }
    shellexpand::full(file)
        .ok()
        .map(|expanded| PathBuf::from(expanded.into_owned()))
}

/// Compact single-line record of one decision round:
/// `strategy<TAB>count<TAB>explanation; explanation; ...`.
pub fn selection_record(strategy: &str, chosen: &[Rule]) -> String {
    let explanations: Vec<String> = chosen
        .iter()
        .map(|r| r.explanation().replace('\n', " "))
        .collect();
    format!("{strategy}\t{}\t{}", chosen.len(), explanations.join("; "))
}

/// Record the outcome of a decision round under [`SELECTION_TARGET`].
pub fn log_selection(strategy: &str, chosen: &[Rule]) {
    log::info!(target: SELECTION_TARGET, "{}", selection_record(strategy, chosen));
}
