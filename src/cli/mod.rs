//! CLI command implementations for Sylva.

pub(crate) mod inspect;
pub(crate) mod run;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use indicatif::style::TemplateError;
use sylva::error::{LookupError, PositionError, SnapshotError};
use sylva::tournament::{PolicyKind, TournamentError};
use thiserror::Error;

/// Policy choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PolicyArg {
    /// Uniformly random legal move.
    Random,
    /// One-ply heuristic.
    Greedy,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Random => Self::Random,
            PolicyArg::Greedy => Self::Greedy,
        }
    }
}

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Pick a seed from the clock when none was given.
fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos() & u128::from(u64::MAX)).unwrap_or(42))
            .unwrap_or(42)
    })
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A game could not be set up or played.
    #[error(transparent)]
    Tournament(#[from] TournamentError),
    /// A position file could not be loaded or saved.
    #[error(transparent)]
    Position(#[from] PositionError),
    /// A position names cells or trees that cannot exist.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// A player or cell id does not exist.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// JSON output could not be produced.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// The progress bar template is malformed.
    #[error("invalid progress template: {0}")]
    Template(#[from] TemplateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_keeps_source_message() {
        let err = CliError::from(LookupError::UnknownPlayer(2));
        assert!(matches!(err, CliError::Lookup(LookupError::UnknownPlayer(2))));
        assert_eq!(err.to_string(), LookupError::UnknownPlayer(2).to_string());

        let json = serde_json::from_str::<u32>("{").unwrap_err();
        let err = CliError::from(json);
        assert!(err.to_string().starts_with("JSON serialization failed"));
    }
}
