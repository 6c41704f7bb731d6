//! The interactive collaborator: whoever picks among presented candidates.
//!
//! An [`Oracle`] answers with indices into the slice it was shown. The
//! interactive decision maker checks those answers against its contract;
//! oracles only need to report what was chosen.

/// Line-oriented prompt over any reader/writer pair (a terminal by default).
pub mod console;
/// Replays prepared answers; used by tests and batch runs.
pub mod scripted;

pub use console::ConsoleOracle;
pub use scripted::{FirstCandidate, ScriptedOracle};

use crate::error::Result;
use crate::maker::Reduct;
use crate::rule::Rule;

/// An external actor that chooses among ranked candidates.
///
/// Calls block until the actor answers. Timeouts and cancellation are the
/// implementation's concern.
pub trait Oracle: Send + Sync {
    /// Choose a subset of `candidates`, as ascending indices into the slice.
    fn present(&self, candidates: &[Rule]) -> Result<Vec<usize>>;

    /// Choose one of `reducts`, by index. `core` lists criteria present in
    /// every reduct.
    fn choose_reduct(&self, reducts: &[Reduct], core: &[usize]) -> Result<usize>;
}
