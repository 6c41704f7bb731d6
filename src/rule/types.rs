//! Enumerated literals carried by every rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrsaError;

/// How strongly a rule is backed by the dominance relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Certainty {
    /// Induced from a lower approximation; holds with confidence 1.0.
    Certain,
    /// Induced from a boundary region; generally below 1.0.
    Possible,
}

impl Certainty {
    pub fn as_str(self) -> &'static str {
        match self {
            Certainty::Certain => "certain",
            Certainty::Possible => "possible",
        }
    }

    /// Tag used at the start of a rendered explanation.
    pub fn label(self) -> &'static str {
        match self {
            Certainty::Certain => "CERTAIN",
            Certainty::Possible => "POSSIBLE",
        }
    }
}

impl FromStr for Certainty {
    type Err = DrsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "certain" => Ok(Certainty::Certain),
            "possible" => Ok(Certainty::Possible),
            other => Err(DrsaError::validation(
                "certainty",
                format!("expected \"certain\" or \"possible\", got {other:?}"),
            )),
        }
    }
}

impl fmt::Display for Certainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the decision scale a rule bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lower bound: class at least k.
    Up,
    /// Upper bound: class at most k.
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Comparison operator used when rendering a condition.
    pub fn operator(self) -> &'static str {
        match self {
            Direction::Up => ">=",
            Direction::Down => "<=",
        }
    }

    /// Whether threshold `a` is at most as strict as threshold `b`.
    pub(crate) fn weaker_or_equal(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Up => a <= b,
            Direction::Down => a >= b,
        }
    }
}

impl FromStr for Direction {
    type Err = DrsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(DrsaError::validation(
                "direction",
                format!("expected \"up\" or \"down\", got {other:?}"),
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
