//! Board topology: cells, richness and the coordinate/index mapping.

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::game::CubeCoord;

/// Number of rings around the center cell.
pub const MAP_RING_COUNT: u8 = 3;

/// Number of cells on the board (1 + 6 + 12 + 18).
pub const CELL_COUNT: usize = 37;

/// Index of a cell: 0 is the center, then spiraling outward ring by ring.
pub type CellIndex = usize;

/// Side of the square lookup table covering `-3..=3` on two axes.
const LOOKUP_SIDE: usize = 2 * MAP_RING_COUNT as usize + 1;

/// Sentinel for coordinates with no cell.
const NO_CELL: u8 = u8::MAX;

/// Soil quality of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Richness {
    /// Unusable: no tree can ever stand here.
    None = 0,
    /// Outer ring soil.
    Poor = 1,
    /// Middle ring soil.
    Ok = 2,
    /// Inner ring soil.
    Lush = 3,
}

impl Richness {
    /// Convert a protocol richness level (`0..=3`).
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::None),
            1 => Some(Self::Poor),
            2 => Some(Self::Ok),
            3 => Some(Self::Lush),
            _ => None,
        }
    }

    /// Protocol richness level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Whether a tree can be placed on a cell of this richness.
    #[must_use]
    pub const fn is_usable(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A board cell as supplied by the game host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Spiral index of the cell.
    pub index: CellIndex,
    /// Soil quality.
    pub richness: Richness,
}

impl Cell {
    /// Create a cell.
    #[must_use]
    pub const fn new(index: CellIndex, richness: Richness) -> Self {
        Self { index, richness }
    }
}

/// Coordinates of every cell in spiral order.
///
/// Starts at the center, then walks each ring from its direction-0 corner,
/// stepping in direction `(side + 2) % 6` along each of the six sides.
#[must_use]
pub fn spiral() -> [CubeCoord; CELL_COUNT] {
    let mut coords = [CubeCoord::ORIGIN; CELL_COUNT];
    let mut index = 1;
    let mut coord = CubeCoord::ORIGIN.neighbor(0);

    for radius in 1..=MAP_RING_COUNT {
        for side in 0..6 {
            for _ in 0..radius {
                coords[index] = coord;
                index += 1;
                coord = coord.neighbor(side + 2);
            }
        }
        coord = coord.neighbor(0);
    }

    coords
}

/// The 37-cell hexagonal board.
///
/// Cells are stored by index; a precomputed table maps coordinates back to
/// indices, so the board is a flat value that copies cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Coordinate of each cell, by index.
    coords: [CubeCoord; CELL_COUNT],
    /// Richness of each cell, by index.
    richness: [Richness; CELL_COUNT],
    /// Cell index for each `(x, y)` pair offset by the ring count.
    lookup: [u8; LOOKUP_SIDE * LOOKUP_SIDE],
}

impl Board {
    /// Create a board with every cell at the given richness.
    #[must_use]
    pub fn uniform(richness: Richness) -> Self {
        let coords = spiral();
        let mut lookup = [NO_CELL; LOOKUP_SIDE * LOOKUP_SIDE];
        for (index, coord) in coords.iter().enumerate() {
            if let Some(slot) = lookup_slot(*coord) {
                lookup[slot] = u8::try_from(index).unwrap_or(NO_CELL);
            }
        }

        Self {
            coords,
            richness: [richness; CELL_COUNT],
            lookup,
        }
    }

    /// Build a board from the host's ordered cell list.
    ///
    /// The list is laid onto the spiral in order, so cell `i` must carry
    /// index `i`.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly [`CELL_COUNT`] cells are supplied in
    /// index order.
    pub fn from_cells(cells: &[Cell]) -> Result<Self, BoardError> {
        if cells.len() != CELL_COUNT {
            return Err(BoardError::CellCount {
                expected: CELL_COUNT,
                actual: cells.len(),
            });
        }

        let mut board = Self::uniform(Richness::None);
        for (position, cell) in cells.iter().enumerate() {
            if cell.index != position {
                return Err(BoardError::OutOfOrder {
                    position,
                    index: cell.index,
                });
            }
            board.richness[position] = cell.richness;
        }

        Ok(board)
    }

    /// Build a board from `(index, richness level)` pairs as read from the
    /// protocol.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown richness levels or a malformed list.
    pub fn from_levels(levels: &[(CellIndex, u8)]) -> Result<Self, BoardError> {
        let cells = levels
            .iter()
            .map(|&(index, level)| {
                Richness::from_level(level)
                    .map(|richness| Cell::new(index, richness))
                    .ok_or(BoardError::InvalidRichness(level))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(&cells)
    }

    /// Number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        CELL_COUNT
    }

    /// Always false: the board has a fixed shape.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Coordinate of a cell.
    #[must_use]
    pub fn coord(&self, index: CellIndex) -> Option<CubeCoord> {
        self.coords.get(index).copied()
    }

    /// Cell index at a coordinate, if the coordinate is on the board.
    #[must_use]
    pub fn index_of(&self, coord: CubeCoord) -> Option<CellIndex> {
        let slot = lookup_slot(coord)?;
        match self.lookup[slot] {
            NO_CELL => None,
            index => Some(usize::from(index)),
        }
    }

    /// Richness of a cell.
    #[must_use]
    pub fn richness(&self, index: CellIndex) -> Option<Richness> {
        self.richness.get(index).copied()
    }

    /// The cell record at an index.
    #[must_use]
    pub fn cell(&self, index: CellIndex) -> Option<Cell> {
        self.richness(index).map(|richness| Cell::new(index, richness))
    }

    /// Whether a tree may ever stand on this cell.
    #[must_use]
    pub fn is_usable(&self, index: CellIndex) -> bool {
        self.richness(index).is_some_and(Richness::is_usable)
    }

    /// Iterate over all cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).filter_map(|index| self.cell(index))
    }

    /// Indices of all cells on a given ring.
    pub fn ring(&self, ring: u8) -> impl Iterator<Item = CellIndex> + '_ {
        self.coords
            .iter()
            .enumerate()
            .filter(move |(_, coord)| coord.ring() == ring)
            .map(|(index, _)| index)
    }

    /// Overwrite the richness of a cell. Used by board generation only.
    pub(crate) fn set_richness(&mut self, index: CellIndex, richness: Richness) {
        if let Some(slot) = self.richness.get_mut(index) {
            *slot = richness;
        }
    }
}

/// Position of a coordinate in the lookup table, if inside the bounding box.
fn lookup_slot(coord: CubeCoord) -> Option<usize> {
    let offset = i16::from(MAP_RING_COUNT);
    let x = usize::try_from(i16::from(coord.x()) + offset).ok()?;
    let y = usize::try_from(i16::from(coord.y()) + offset).ok()?;
    (x < LOOKUP_SIDE && y < LOOKUP_SIDE).then_some(x * LOOKUP_SIDE + y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels_all(level: u8) -> Vec<(CellIndex, u8)> {
        (0..CELL_COUNT).map(|i| (i, level)).collect()
    }

    #[test]
    fn test_spiral_starts_at_center() {
        let coords = spiral();
        assert_eq!(coords[0], CubeCoord::ORIGIN);
        assert_eq!(coords[1], CubeCoord::ORIGIN.neighbor(0));
        assert_eq!(coords[7], CubeCoord::ORIGIN.neighbor_at(0, 2));
        assert_eq!(coords[19], CubeCoord::ORIGIN.neighbor_at(0, 3));
    }

    #[test]
    fn test_spiral_rings() {
        let coords = spiral();
        assert_eq!(coords[0].ring(), 0);
        assert!(coords[1..7].iter().all(|c| c.ring() == 1));
        assert!(coords[7..19].iter().all(|c| c.ring() == 2));
        assert!(coords[19..].iter().all(|c| c.ring() == 3));
    }

    #[test]
    fn test_spiral_walks_adjacent_cells() {
        let coords = spiral();
        // Consecutive cells within a ring are neighbours
        for window in coords[1..7].windows(2) {
            assert_eq!(window[0].distance_to(window[1]), 1);
        }
        for window in coords[19..].windows(2) {
            assert_eq!(window[0].distance_to(window[1]), 1);
        }
    }

    #[test]
    fn test_index_lookup_roundtrip() {
        let board = Board::uniform(Richness::Lush);
        for index in 0..CELL_COUNT {
            let coord = board.coord(index).unwrap();
            assert_eq!(board.index_of(coord), Some(index));
        }
    }

    #[test]
    fn test_index_of_off_board() {
        let board = Board::uniform(Richness::Lush);
        assert_eq!(board.index_of(CubeCoord::ORIGIN.neighbor_at(1, 4)), None);
        // Inside the bounding box but beyond ring 3
        assert_eq!(board.index_of(CubeCoord::from_xy(3, 3)), None);
    }

    #[test]
    fn test_from_levels() {
        let mut levels = levels_all(3);
        levels[5].1 = 0;
        let board = Board::from_levels(&levels).unwrap();
        assert_eq!(board.richness(0), Some(Richness::Lush));
        assert_eq!(board.richness(5), Some(Richness::None));
        assert!(!board.is_usable(5));
        assert!(board.is_usable(6));
        assert_eq!(board.cell(5), Some(Cell::new(5, Richness::None)));
        assert_eq!(board.cell(CELL_COUNT), None);

        // Cells come back in index order and rebuild the same board
        let cells: Vec<_> = board.cells().collect();
        assert_eq!(cells.len(), CELL_COUNT);
        assert_eq!(cells[5], Cell::new(5, Richness::None));
        assert_eq!(Board::from_cells(&cells), Ok(board));
    }

    #[test]
    fn test_from_cells_wrong_count() {
        let cells: Vec<_> = (0..10).map(|i| Cell::new(i, Richness::Ok)).collect();
        assert_eq!(
            Board::from_cells(&cells),
            Err(BoardError::CellCount {
                expected: CELL_COUNT,
                actual: 10
            })
        );
    }

    #[test]
    fn test_from_cells_out_of_order() {
        let mut cells: Vec<_> = (0..CELL_COUNT).map(|i| Cell::new(i, Richness::Ok)).collect();
        cells.swap(3, 4);
        assert_eq!(
            Board::from_cells(&cells),
            Err(BoardError::OutOfOrder {
                position: 3,
                index: 4
            })
        );
    }

    #[test]
    fn test_invalid_richness() {
        let mut levels = levels_all(1);
        levels[2].1 = 9;
        assert_eq!(
            Board::from_levels(&levels),
            Err(BoardError::InvalidRichness(9))
        );
    }

    #[test]
    fn test_ring_sizes() {
        let board = Board::uniform(Richness::Poor);
        assert_eq!(board.ring(0).count(), 1);
        assert_eq!(board.ring(1).count(), 6);
        assert_eq!(board.ring(2).count(), 12);
        assert_eq!(board.ring(3).count(), 18);
    }
}
