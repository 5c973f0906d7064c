//! Deterministic board generation.
//!
//! Richness is laid out by ring, a random symmetric set of holes is drilled,
//! then two pairs of mirrored starting trees are placed on the outer ring.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::error::MapGenError;
use crate::game::{Board, CellIndex, CubeCoord, Forest, Richness, Tree, TreeSize, MAP_RING_COUNT};

/// Upper bound on the number of holes drilled into a generated board.
pub const MAX_EMPTY_CELLS: u32 = 10;

/// Starting trees per player.
pub const STARTING_TREE_COUNT: usize = 2;

/// Size of every starting tree.
pub const STARTING_TREE_SIZE: TreeSize = TreeSize::Small;

/// Minimum gap between starting trees: candidates this close are discarded.
pub const STARTING_TREE_DISTANCE: u8 = 2;

/// Placement attempts on one board before it is regenerated.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Boards generated before giving up.
pub const MAX_BOARD_ATTEMPTS: usize = 100;

/// Generate a board and starting trees from a seed.
///
/// # Errors
///
/// Returns an error if no generated board could host the starting trees.
pub fn generate_map(seed: u64) -> Result<(Board, Forest), MapGenError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for attempt in 0..MAX_BOARD_ATTEMPTS {
        let board = generate_board(&mut rng);
        if let Some(forest) = place_starting_trees(&board, &mut rng) {
            debug!(seed, attempt, trees = forest.len(), "generated board");
            return Ok((board, forest));
        }
        trace!(seed, attempt, "no starting positions, regenerating board");
    }

    Err(MapGenError::NoStartingPositions {
        attempts: MAX_BOARD_ATTEMPTS,
    })
}

/// Lay out richness by ring and drill symmetric holes.
pub fn generate_board<R: Rng>(rng: &mut R) -> Board {
    let mut board = Board::uniform(Richness::Lush);
    for ring in [MAP_RING_COUNT, MAP_RING_COUNT - 1] {
        let richness = if ring == MAP_RING_COUNT {
            Richness::Poor
        } else {
            Richness::Ok
        };
        let cells: Vec<CellIndex> = board.ring(ring).collect();
        for cell in cells {
            board.set_richness(cell, richness);
        }
    }

    drill_holes(&mut board, rng);
    board
}

fn drill_holes<R: Rng>(board: &mut Board, rng: &mut R) {
    let wanted = rng.gen_range(0..=MAX_EMPTY_CELLS);
    let mut removed = 0;

    // One short of the quota so a center hole can round it off
    while removed + 1 < wanted {
        let cell = rng.gen_range(0..board.len());
        if !board.is_usable(cell) {
            continue;
        }
        board.set_richness(cell, Richness::None);
        removed += 1;

        let Some(coord) = board.coord(cell) else {
            continue;
        };
        if coord != coord.opposite() {
            if let Some(opposite) = board.index_of(coord.opposite()) {
                board.set_richness(opposite, Richness::None);
                removed += 1;
            }
        }
    }
}

/// Usable cells on the outer ring, in index order.
#[must_use]
pub fn starting_candidates(board: &Board) -> Vec<CubeCoord> {
    board
        .ring(MAP_RING_COUNT)
        .filter(|&cell| board.is_usable(cell))
        .filter_map(|cell| board.coord(cell))
        .collect()
}

/// One placement attempt.
///
/// Returns the chosen coordinates as `[a, -a, b, -b, ...]`, or `None` when
/// candidates ran out before every pair was placed.
pub fn try_starting_coords<R: Rng>(candidates: &[CubeCoord], rng: &mut R) -> Option<Vec<CubeCoord>> {
    let mut available = candidates.to_vec();
    let mut chosen = Vec::with_capacity(STARTING_TREE_COUNT * 2);

    for _ in 0..STARTING_TREE_COUNT {
        if available.is_empty() {
            return None;
        }
        let coord = available[rng.gen_range(0..available.len())];
        let opposite = coord.opposite();

        available.retain(|c| {
            c.distance_to(coord) > STARTING_TREE_DISTANCE
                && c.distance_to(opposite) > STARTING_TREE_DISTANCE
        });
        chosen.push(coord);
        chosen.push(opposite);
    }

    Some(chosen)
}

/// Place the starting trees, retrying up to [`MAX_PLACEMENT_ATTEMPTS`] times.
///
/// Player 0 receives the even positions of the chosen list and player 1 the
/// odd ones, so every tree faces a mirrored opponent tree.
pub fn place_starting_trees<R: Rng>(board: &Board, rng: &mut R) -> Option<Forest> {
    let candidates = starting_candidates(board);
    if candidates.is_empty() {
        return None;
    }

    let coords = (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| try_starting_coords(&candidates, &mut *rng))?;

    let mut forest = Forest::new();
    for (position, coord) in coords.into_iter().enumerate() {
        let cell = board.index_of(coord)?;
        #[allow(clippy::cast_possible_truncation)]
        let owner = (position % 2) as u8;
        forest.insert(cell, Tree::new(owner, STARTING_TREE_SIZE));
    }
    Some(forest)
}
