//! Player actions and their textual form.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseActionError;
use crate::game::CellIndex;

/// One action a player can take during an action pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Sleep until the next round.
    Wait,
    /// Grow the tree on `target` by one size.
    Grow {
        /// Cell of the tree to grow.
        target: CellIndex,
    },
    /// Harvest the tall tree on `target` for points.
    Complete {
        /// Cell of the tree to harvest.
        target: CellIndex,
    },
    /// Throw a seed from the tree on `source` onto `target`.
    Seed {
        /// Cell of the seeding tree.
        source: CellIndex,
        /// Cell the seed lands on.
        target: CellIndex,
    },
}

impl Action {
    /// Protocol verb.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Wait => "WAIT",
            Self::Grow { .. } => "GROW",
            Self::Complete { .. } => "COMPLETE",
            Self::Seed { .. } => "SEED",
        }
    }

    /// Every cell the action refers to.
    #[must_use]
    pub fn cells(self) -> Vec<CellIndex> {
        match self {
            Self::Wait => Vec::new(),
            Self::Grow { target } | Self::Complete { target } => vec![target],
            Self::Seed { source, target } => vec![source, target],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())?;
        for cell in self.cells() {
            write!(f, " {cell}")?;
        }
        Ok(())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(ParseActionError::Empty)?;
        let args: Vec<&str> = words.collect();

        let (verb, expected) = match verb {
            "WAIT" => ("WAIT", 0),
            "GROW" => ("GROW", 1),
            "COMPLETE" => ("COMPLETE", 1),
            "SEED" => ("SEED", 2),
            other => return Err(ParseActionError::UnknownVerb(other.to_string())),
        };
        if args.len() != expected {
            return Err(ParseActionError::Arity {
                verb,
                expected,
                actual: args.len(),
            });
        }

        let cells = args
            .iter()
            .map(|arg| {
                arg.parse::<CellIndex>()
                    .map_err(|_| ParseActionError::InvalidIndex((*arg).to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match (verb, cells.as_slice()) {
            ("GROW", &[target]) => Self::Grow { target },
            ("COMPLETE", &[target]) => Self::Complete { target },
            ("SEED", &[source, target]) => Self::Seed { source, target },
            _ => Self::Wait,
        })
    }
}
