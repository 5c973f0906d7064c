//! Game layer for Sylva.
//!
//! Implements the rules of the forest game:
//! - Hex coordinates and the 37-cell board
//! - Trees, the sun and shadows
//! - Costs, harvest scoring and nutrients
//! - Action resolution and the phase-by-phase turn engine
//! - Legal move enumeration and snapshot exchange

mod action;
mod board;
mod economy;
mod hex;
mod invariants;
mod mapgen;
mod moves;
mod player;
mod resolver;
mod shadow;
mod snapshot;
mod state;
mod tree;
mod turn;

pub use action::Action;
pub use board::{spiral, Board, Cell, CellIndex, Richness, CELL_COUNT, MAP_RING_COUNT};
pub use economy::{
    decay_nutrients, growth_cost, harvest_points, richness_bonus, seed_cost, LIFECYCLE_END_COST,
    RICHNESS_BONUS_LUSH, RICHNESS_BONUS_OK, STARTING_NUTRIENTS, TREE_BASE_COST,
};
pub use hex::{CubeCoord, DIRECTIONS};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use mapgen::{
    generate_board, generate_map, place_starting_trees, starting_candidates, try_starting_coords,
    MAX_BOARD_ATTEMPTS, MAX_EMPTY_CELLS, MAX_PLACEMENT_ATTEMPTS, STARTING_TREE_COUNT,
    STARTING_TREE_DISTANCE, STARTING_TREE_SIZE,
};
pub use player::{Player, PlayerId, PLAYER_COUNT};
pub use resolver::{validate, ActionPass, PassOutcome};
pub use shadow::{Shadows, Sun};
pub use snapshot::{PlayerSnapshot, Position, Snapshot, TreeSnapshot};
pub use state::{GameState, MAX_ROUNDS};
pub use tree::{Forest, Seed, Tree, TreeSize};
pub use turn::Phase;
