//! Game invariants - sanity checks that detect bugs.
//!
//! These should never trigger for a state driven only through the engine
//! and snapshot ingestion. If they do, it indicates a bug.

use thiserror::Error;

use crate::game::{GameState, TreeSize, CELL_COUNT, MAX_ROUNDS, STARTING_NUTRIENTS};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board = state.board();

    // Coordinate/index bijection and point symmetry of the cell set
    for index in 0..CELL_COUNT {
        match board.coord(index) {
            Some(coord) => {
                if board.index_of(coord) != Some(index) {
                    violations.push(violation(format!(
                        "Cell {index} at {coord} does not map back to its index"
                    )));
                }
                if board.index_of(coord.opposite()).is_none() {
                    violations.push(violation(format!(
                        "Cell {index} at {coord} has no opposite cell"
                    )));
                }
            }
            None => violations.push(violation(format!("Cell {index} has no coordinate"))),
        }
    }

    for (cell, tree) in state.forest().iter() {
        if !board.is_usable(cell) {
            violations.push(violation(format!(
                "Tree of player {} stands on unusable cell {cell}",
                tree.owner
            )));
        }
        if state.player(tree.owner).is_err() {
            violations.push(violation(format!(
                "Tree on cell {cell} has unknown owner {}",
                tree.owner
            )));
        }
    }

    if state.nutrients() > STARTING_NUTRIENTS {
        violations.push(violation(format!(
            "Nutrients {} exceed starting value {STARTING_NUTRIENTS}",
            state.nutrients()
        )));
    }

    if state.round() > MAX_ROUNDS {
        violations.push(violation(format!(
            "Round {} is past the last round {MAX_ROUNDS}",
            state.round()
        )));
    }

    if state.round() < MAX_ROUNDS
        && u32::from(state.sun().orientation()) != state.round() % 6
    {
        violations.push(violation(format!(
            "Sun orientation {} does not match round {}",
            state.sun().orientation(),
            state.round()
        )));
    }

    for cell in 0..CELL_COUNT {
        let strength = state.shadows().strength(cell);
        if strength > TreeSize::Tall.level() {
            violations.push(violation(format!(
                "Cell {cell} has shadow strength {strength}"
            )));
        }
    }

    for (id, player) in state.players().iter().enumerate() {
        if usize::from(player.id) != id {
            violations.push(violation(format!(
                "Player slot {id} holds player {}",
                player.id
            )));
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
