use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};
use std::sync::Mutex;

use super::Oracle;
use crate::error::{DrsaError, Result};
use crate::maker::Reduct;
use crate::rule::Rule;
use crate::ruleset::numbered_listing;

const RULE_PROMPT: &str =
    "Select rule(s) to enforce (comma-separated indices, Enter to skip): ";
const REDUCT_PROMPT: &str = "Select reduct by index (Enter for 0): ";

/// Prompts on a writer and reads answers from a reader, one line per answer.
///
/// Unparsable answers are reported and asked again; a closed reader is an
/// interaction failure.
pub struct ConsoleOracle<R, W> {
    io: Mutex<(R, W)>,
}

impl ConsoleOracle<BufReader<Stdin>, Stderr> {
    /// Prompt on stderr, read from stdin. Keeps stdout free for results.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead + Send, W: Write + Send> ConsoleOracle<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    /// Give back the reader and writer, e.g. to inspect captured output.
    pub fn into_inner(self) -> (R, W) {
        match self.io.into_inner() {
            Ok(io) => io,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Print `header`, then prompt until `parse` accepts a line.
    fn ask<T>(
        &self,
        header: &[String],
        prompt: &str,
        parse: impl Fn(&str) -> std::result::Result<T, String>,
    ) -> Result<T> {
        let mut guard = self
            .io
            .lock()
            .map_err(|_| DrsaError::Interaction("console oracle lock poisoned".into()))?;
        let (reader, writer) = &mut *guard;

        for line in header {
            writeln!(writer, "{line}").map_err(io_error)?;
        }
        loop {
            write!(writer, "\n{prompt}").map_err(io_error)?;
            writer.flush().map_err(io_error)?;

            let mut answer = String::new();
            if reader.read_line(&mut answer).map_err(io_error)? == 0 {
                return Err(DrsaError::Interaction("input closed before an answer".into()));
            }
            match parse(answer.trim()) {
                Ok(value) => return Ok(value),
                Err(msg) => writeln!(writer, "{msg}").map_err(io_error)?,
            }
        }
    }
}

fn io_error(e: io::Error) -> DrsaError {
    DrsaError::Interaction(format!("console I/O failed: {e}"))
}

/// Parse `"2, 0,2"` into sorted, de-duplicated indices below `len`.
pub(crate) fn parse_indices(answer: &str, len: usize) -> std::result::Result<Vec<usize>, String> {
    if answer.is_empty() {
        return Ok(Vec::new());
    }
    let mut picks = Vec::new();
    let mut invalid = Vec::new();
    for token in answer.split(',').map(str::trim) {
        match token.parse::<usize>() {
            Ok(i) if i < len => picks.push(i),
            _ => invalid.push(token.to_string()),
        }
    }
    if !invalid.is_empty() {
        return Err(format!(
            "Invalid selection(s): {}. Enter indices between 0 and {}.",
            invalid.join(", "),
            len.saturating_sub(1)
        ));
    }
    picks.sort_unstable();
    picks.dedup();
    Ok(picks)
}

impl<R: BufRead + Send, W: Write + Send> Oracle for ConsoleOracle<R, W> {
    fn present(&self, candidates: &[Rule]) -> Result<Vec<usize>> {
        let mut header = vec!["\nInduced decision rules:".to_string()];
        header.extend(numbered_listing(candidates));
        self.ask(&header, RULE_PROMPT, |answer| {
            parse_indices(answer, candidates.len())
        })
    }

    fn choose_reduct(&self, reducts: &[Reduct], core: &[usize]) -> Result<usize> {
        let mut header = vec!["\nAvailable reducts:".to_string()];
        header.extend(
            reducts
                .iter()
                .enumerate()
                .map(|(i, r)| format!("[{i}] {r}")),
        );
        header.push(format!(
            "Core criteria (must keep): {}",
            Reduct::new(core.to_vec())
        ));
        self.ask(&header, REDUCT_PROMPT, |answer| {
            if answer.is_empty() {
                return Ok(0);
            }
            match answer.parse::<usize>() {
                Ok(i) if i < reducts.len() => Ok(i),
                _ => Err(format!(
                    "Invalid reduct: {answer}. Enter an index between 0 and {}.",
                    reducts.len().saturating_sub(1)
                )),
            }
        })
    }
}
