use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Oracle;
use crate::error::{DrsaError, Result};
use crate::maker::Reduct;
use crate::rule::Rule;

/// Answers from a prepared script, in order. Running out of answers is an
/// interaction failure.
#[derive(Default)]
pub struct ScriptedOracle {
    answers: Mutex<VecDeque<Result<Vec<usize>>>>,
    reduct_answers: Mutex<VecDeque<usize>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next `present` call.
    pub fn answer(self, picks: &[usize]) -> Self {
        push(&self.answers, Ok(picks.to_vec()));
        self
    }

    /// Queue a failure for the next `present` call.
    pub fn fail(self, reason: &str) -> Self {
        push(&self.answers, Err(DrsaError::Interaction(reason.to_string())));
        self
    }

    /// Queue an answer for the next `choose_reduct` call.
    pub fn reduct(self, index: usize) -> Self {
        push(&self.reduct_answers, index);
        self
    }

    /// Number of interactions so far, of either kind.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn push<T>(queue: &Mutex<VecDeque<T>>, item: T) {
    match queue.lock() {
        Ok(mut q) => q.push_back(item),
        Err(poisoned) => poisoned.into_inner().push_back(item),
    }
}

fn pop<T>(queue: &Mutex<VecDeque<T>>) -> Result<T> {
    let mut q = queue
        .lock()
        .map_err(|_| DrsaError::Interaction("scripted oracle lock poisoned".into()))?;
    q.pop_front()
        .ok_or_else(|| DrsaError::Interaction("scripted oracle has no answer left".into()))
}

impl Oracle for ScriptedOracle {
    fn present(&self, _candidates: &[Rule]) -> Result<Vec<usize>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        pop(&self.answers)?
    }

    fn choose_reduct(&self, _reducts: &[Reduct], _core: &[usize]) -> Result<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        pop(&self.reduct_answers)
    }
}

/// Always picks the best-ranked candidate (and the first reduct).
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidate;

impl Oracle for FirstCandidate {
    fn present(&self, candidates: &[Rule]) -> Result<Vec<usize>> {
        if candidates.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![0])
        }
    }

    fn choose_reduct(&self, _reducts: &[Reduct], _core: &[usize]) -> Result<usize> {
        Ok(0)
    }
}
