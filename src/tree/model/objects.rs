use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::tree::common::errors::{PropagationError, Result};

/// A pair of values indexed by outcome: `[value if absent, value if present]`.
pub type Pair = [f64; 2];

/// Non-informative lambda state: no evidence from below.
pub const VACUOUS: Pair = [1.0, 1.0];

/// Tolerance used when validating that a table column is a distribution.
pub const COLUMN_SUM_TOLERANCE: f64 = 1e-9;

/// One of the two values a binary variable can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Outcome {
    /// The event did not occur (index 0).
    Absent,
    /// The event occurred (index 1).
    Present,
}

impl Outcome {
    pub fn index(self) -> usize {
        match self {
            Outcome::Absent => 0,
            Outcome::Present => 1,
        }
    }
}

impl TryFrom<u8> for Outcome {
    type Error = PropagationError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Outcome::Absent),
            1 => Ok(Outcome::Present),
            other => Err(PropagationError::InvalidOutcome(other.to_string())),
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> u8 {
        outcome.index() as u8
    }
}

impl From<bool> for Outcome {
    fn from(occurred: bool) -> Self {
        if occurred { Outcome::Present } else { Outcome::Absent }
    }
}

impl FromStr for Outcome {
    type Err = PropagationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "false" | "absent" => Ok(Outcome::Absent),
            "1" | "true" | "present" => Ok(Outcome::Present),
            _ => Err(PropagationError::InvalidOutcome(s.to_string())),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Absent => write!(f, "absent (0)"),
            Outcome::Present => write!(f, "present (1)"),
        }
    }
}

/// The hard-evidence pair selecting `outcome`.
pub fn one_hot(outcome: Outcome) -> Pair {
    match outcome {
        Outcome::Absent => [1.0, 0.0],
        Outcome::Present => [0.0, 1.0],
    }
}

/// Returns the outcome a pair is pinned to, if it is exactly `(1, 0)` or `(0, 1)`.
pub fn one_hot_outcome(pair: &Pair) -> Option<Outcome> {
    if pair[0] == 1.0 && pair[1] == 0.0 {
        Some(Outcome::Absent)
    } else if pair[0] == 0.0 && pair[1] == 1.0 {
        Some(Outcome::Present)
    } else {
        None
    }
}

pub fn is_one_hot(pair: &Pair) -> bool {
    one_hot_outcome(pair).is_some()
}

/// Probability table attached to a node.
///
/// `Conditional` rows are indexed `[child outcome][parent outcome]`, so
/// `rows[i][j] = P(child = i | parent = j)` and each column sums to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbabilityTable {
    /// Unconditional `(P(false), P(true))`, only valid on the root.
    Prior(Pair),
    Conditional([[f64; 2]; 2]),
}

impl ProbabilityTable {
    pub fn prior(&self) -> Option<&Pair> {
        match self {
            ProbabilityTable::Prior(pair) => Some(pair),
            ProbabilityTable::Conditional(_) => None,
        }
    }

    pub fn conditional(&self) -> Option<&[[f64; 2]; 2]> {
        match self {
            ProbabilityTable::Conditional(rows) => Some(rows),
            ProbabilityTable::Prior(_) => None,
        }
    }

    /// Checks every entry lies in `[0, 1]` and every distribution sums to one.
    ///
    /// The propagation engine never calls this; tables are trusted there.
    pub fn validate(&self, identifier: char) -> Result<()> {
        let invalid = |reason: String| PropagationError::InvalidTable { identifier, reason };
        let columns: Vec<Pair> = match self {
            ProbabilityTable::Prior(pair) => vec![*pair],
            ProbabilityTable::Conditional(rows) => (0..2).map(|j| [rows[0][j], rows[1][j]]).collect(),
        };
        for (j, column) in columns.iter().enumerate() {
            for &p in column {
                if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                    return Err(invalid(format!("entry {} is not a probability", p)));
                }
            }
            let total = column[0] + column[1];
            if (total - 1.0).abs() > COLUMN_SUM_TOLERANCE {
                return Err(invalid(format!("column {} sums to {} instead of 1", j, total)));
            }
        }
        Ok(())
    }
}
