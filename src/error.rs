//! Error types for the simulator.
//!
//! Two families matter at runtime:
//! - [`IllegalAction`]: an action broke a game rule. The turn engine recovers
//!   by forcing the acting player to wait for the rest of the round.
//! - [`LookupError`]: a reference to a cell or player that does not exist.
//!   This is a caller bug, not a rule violation, and is rejected as early as
//!   possible (when an action is staged or a snapshot is ingested).

use thiserror::Error;

use crate::game::{CellIndex, PlayerId, TreeSize};

/// Reason an action was rejected by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalAction {
    /// The referenced cell holds no tree.
    #[error("cell {0} holds no tree")]
    NoTree(CellIndex),
    /// The tree belongs to the other player.
    #[error("tree on cell {cell} belongs to player {owner}")]
    NotOwner {
        /// Cell holding the tree.
        cell: CellIndex,
        /// Actual owner of the tree.
        owner: PlayerId,
    },
    /// The tree already acted this round.
    #[error("tree on cell {0} is dormant")]
    Dormant(CellIndex),
    /// A tall tree cannot grow any further.
    #[error("tree on cell {0} is already tall")]
    AlreadyTall(CellIndex),
    /// Only tall trees can complete their life cycle.
    #[error("tree on cell {cell} is {size:?}, not tall")]
    NotTall {
        /// Cell holding the tree.
        cell: CellIndex,
        /// Current size of the tree.
        size: TreeSize,
    },
    /// A seed cannot throw seeds of its own.
    #[error("tree on cell {0} is a seed and cannot seed")]
    TooSmall(CellIndex),
    /// The seed target lies further away than the source tree's size.
    #[error("cell {target} is {distance} away from cell {origin}, beyond reach {reach}")]
    OutOfRange {
        /// Seeding tree cell.
        origin: CellIndex,
        /// Requested target cell.
        target: CellIndex,
        /// Hex distance between the two cells.
        distance: u8,
        /// Size of the source tree.
        reach: u8,
    },
    /// The seed target already holds a tree.
    #[error("cell {0} is already occupied")]
    Occupied(CellIndex),
    /// The seed target has no richness and can never hold a tree.
    #[error("cell {0} is unusable")]
    UnusableCell(CellIndex),
    /// The player cannot pay for the action.
    #[error("action costs {cost} sun but only {available} is available")]
    InsufficientSun {
        /// Price of the action.
        cost: u32,
        /// Sun left in the player's pool for this pass.
        available: u32,
    },
}

/// Reference to something that does not exist on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Cell index outside `0..CELL_COUNT`.
    #[error("no cell with index {0}")]
    UnknownCell(CellIndex),
    /// Player index other than 0 or 1.
    #[error("no player with index {0}")]
    UnknownPlayer(PlayerId),
}

/// Any failure to apply an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action broke a game rule.
    #[error("illegal action: {0}")]
    Illegal(#[from] IllegalAction),
    /// The action referenced a nonexistent cell or player.
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

/// Failure to build a board from an explicit cell list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The list does not describe exactly one cell per board position.
    #[error("expected {expected} cells, got {actual}")]
    CellCount {
        /// Number of cells on the board.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// A cell's index does not match its position in the spiral ordering.
    #[error("cell at position {position} has index {index}")]
    OutOfOrder {
        /// Position in the supplied list.
        position: usize,
        /// Index carried by the cell.
        index: CellIndex,
    },
    /// A richness level outside `0..=3`.
    #[error("invalid richness level {0}")]
    InvalidRichness(u8),
}

/// Failure to generate a board with valid starting positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapGenError {
    /// Every generated board failed to host the starting trees.
    #[error("no starting positions found after {attempts} boards")]
    NoStartingPositions {
        /// Number of boards generated before giving up.
        attempts: usize,
    },
}

/// Failure to ingest an external snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// A tree or player reference does not exist.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// Two trees were reported on the same cell.
    #[error("cell {0} holds more than one tree")]
    DuplicateTree(CellIndex),
    /// A tree was reported on a cell with no richness.
    #[error("tree reported on unusable cell {0}")]
    UnusableCell(CellIndex),
    /// A tree size outside `0..=3`.
    #[error("invalid tree size {0}")]
    InvalidSize(u8),
    /// A round past the last one.
    #[error("round {round} is past the last round {max}")]
    RoundOutOfRange {
        /// Reported round.
        round: u32,
        /// Last round of a game.
        max: u32,
    },
    /// More nutrients than a game starts with.
    #[error("nutrients {nutrients} exceed the starting value {max}")]
    NutrientsOutOfRange {
        /// Reported nutrients.
        nutrients: u32,
        /// Starting nutrient value.
        max: u32,
    },
    /// A board richness level outside `0..=3`.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Failure to load or save a position file.
#[derive(Debug, Error)]
pub enum PositionError {
    /// Reading or writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid position document.
    #[error("invalid position JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The position parsed but describes an impossible state.
    #[error("invalid position: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Failure to advance the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The final round has been played.
    #[error("the game is over")]
    GameOver,
}

/// Failure to parse an action from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseActionError {
    /// The line was empty.
    #[error("empty action")]
    Empty,
    /// The verb is not one of `WAIT`, `GROW`, `COMPLETE`, `SEED`.
    #[error("unknown action {0:?}")]
    UnknownVerb(String),
    /// Wrong number of arguments for the verb.
    #[error("{verb} takes {expected} argument(s), got {actual}")]
    Arity {
        /// The action verb.
        verb: &'static str,
        /// Number of arguments the verb takes.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },
    /// An argument is not a cell index.
    #[error("invalid cell index {0:?}")]
    InvalidIndex(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_action_display() {
        let err = IllegalAction::InsufficientSun {
            cost: 7,
            available: 3,
        };
        assert_eq!(err.to_string(), "action costs 7 sun but only 3 is available");
    }

    #[test]
    fn test_action_error_from() {
        let err: ActionError = LookupError::UnknownCell(40).into();
        assert_eq!(err, ActionError::Lookup(LookupError::UnknownCell(40)));
        assert!(err.to_string().contains("40"));
    }
}
