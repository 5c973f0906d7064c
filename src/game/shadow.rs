//! Sun orientation and shadow casting.

use serde::{Deserialize, Serialize};

use crate::game::{Board, CellIndex, Forest, CELL_COUNT};

/// Direction the sun shines towards; shadows fall along it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sun {
    orientation: u8,
}

impl Sun {
    /// A sun pointing in `orientation` (taken modulo 6).
    #[must_use]
    pub const fn new(orientation: u8) -> Self {
        Self {
            orientation: orientation % 6,
        }
    }

    /// Current orientation, `0..6`.
    #[must_use]
    pub const fn orientation(self) -> u8 {
        self.orientation
    }

    /// Rotate one step clockwise.
    pub fn advance(&mut self) {
        self.orientation = (self.orientation + 1) % 6;
    }
}

/// Per-cell shadow strength for one sun orientation.
///
/// Strength is the size of the tallest tree whose shadow reaches the cell;
/// zero means unshadowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadows {
    strength: [u8; CELL_COUNT],
}

impl Default for Shadows {
    fn default() -> Self {
        Self {
            strength: [0; CELL_COUNT],
        }
    }
}

impl Shadows {
    /// Cast every tree's shadow along the sun direction.
    #[must_use]
    pub fn compute(board: &Board, forest: &Forest, sun: Sun) -> Self {
        let mut shadows = Self::default();
        let direction = usize::from(sun.orientation());

        for (cell, tree) in forest.iter() {
            let Some(origin) = board.coord(cell) else {
                continue;
            };
            let size = tree.size.level();
            for distance in 1..=size {
                #[allow(clippy::cast_possible_wrap)]
                let target = origin.neighbor_at(direction, distance as i8);
                if let Some(index) = board.index_of(target) {
                    let slot = &mut shadows.strength[index];
                    *slot = (*slot).max(size);
                }
            }
        }

        shadows
    }

    /// Shadow strength on a cell; zero when unshadowed or out of range.
    #[must_use]
    pub fn strength(&self, cell: CellIndex) -> u8 {
        self.strength.get(cell).copied().unwrap_or(0)
    }

    /// Whether a tree of `size` on `cell` is blocked from gathering sun.
    #[must_use]
    pub fn blocks(&self, cell: CellIndex, size: u8) -> bool {
        let strength = self.strength(cell);
        strength > 0 && strength >= size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Richness, Tree, TreeSize};

    fn board() -> Board {
        Board::uniform(Richness::Lush)
    }

    #[test]
    fn test_sun_wraps() {
        let mut sun = Sun::new(5);
        sun.advance();
        assert_eq!(sun.orientation(), 0);
        assert_eq!(Sun::new(13).orientation(), 1);
    }

    #[test]
    fn test_shadow_length_matches_size() {
        let board = board();
        let mut forest = Forest::new();
        forest.insert(0, Tree::new(0, TreeSize::Medium));

        let shadows = Shadows::compute(&board, &forest, Sun::new(0));
        // Center's direction-0 line: cells 1, 7, 19
        assert_eq!(shadows.strength(1), 2);
        assert_eq!(shadows.strength(7), 2);
        assert_eq!(shadows.strength(19), 0);
        assert_eq!(shadows.strength(0), 0);
    }

    #[test]
    fn test_shadow_is_max_not_sum() {
        let board = board();
        let mut forest = Forest::new();
        forest.insert(0, Tree::new(0, TreeSize::Tall));
        forest.insert(1, Tree::new(1, TreeSize::Small));

        let shadows = Shadows::compute(&board, &forest, Sun::new(0));
        assert_eq!(shadows.strength(1), 3);
        assert_eq!(shadows.strength(7), 3);
        assert_eq!(shadows.strength(19), 3);
    }

    #[test]
    fn test_seed_casts_nothing() {
        let board = board();
        let mut forest = Forest::new();
        forest.insert(0, Tree::new(0, TreeSize::Seed));
        let shadows = Shadows::compute(&board, &forest, Sun::new(3));
        assert!((0..CELL_COUNT).all(|cell| shadows.strength(cell) == 0));
    }

    #[test]
    fn test_shadow_falls_off_board() {
        let board = board();
        let mut forest = Forest::new();
        forest.insert(19, Tree::new(0, TreeSize::Tall));
        let shadows = Shadows::compute(&board, &forest, Sun::new(0));
        assert!((0..CELL_COUNT).all(|cell| shadows.strength(cell) == 0));
    }

    #[test]
    fn test_blocks_only_equal_or_smaller() {
        let board = board();
        let mut forest = Forest::new();
        forest.insert(0, Tree::new(0, TreeSize::Medium));
        let shadows = Shadows::compute(&board, &forest, Sun::new(0));

        assert!(shadows.blocks(1, 1));
        assert!(shadows.blocks(1, 2));
        assert!(!shadows.blocks(1, 3));
        assert!(!shadows.blocks(2, 1));
    }
}
