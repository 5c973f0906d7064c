//! Trees, in-flight seeds and the board-wide tree table.

use serde::{Deserialize, Serialize};

use crate::game::{CellIndex, PlayerId, CELL_COUNT};

/// Growth stage of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TreeSize {
    /// Freshly planted; casts no shadow and gathers nothing.
    Seed = 0,
    /// Size 1.
    Small = 1,
    /// Size 2.
    Medium = 2,
    /// Size 3; the only size that can complete its life cycle.
    Tall = 3,
}

impl TreeSize {
    /// All sizes, smallest first.
    pub const ALL: [Self; 4] = [Self::Seed, Self::Small, Self::Medium, Self::Tall];

    /// Convert a protocol size (`0..=3`).
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Seed),
            1 => Some(Self::Small),
            2 => Some(Self::Medium),
            3 => Some(Self::Tall),
            _ => None,
        }
    }

    /// Numeric size: sun gathered per round and shadow length.
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// The size after one GROW, or `None` for a tall tree.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Seed => Some(Self::Small),
            Self::Small => Some(Self::Medium),
            Self::Medium => Some(Self::Tall),
            Self::Tall => None,
        }
    }
}

/// A living tree. Its cell is the key it is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Owning player.
    pub owner: PlayerId,
    /// Current growth stage.
    pub size: TreeSize,
    /// Already acted this round.
    pub dormant: bool,
    /// Cell of the tree that threw this one's seed.
    pub father: Option<CellIndex>,
}

impl Tree {
    /// Create an active tree with no recorded father.
    #[must_use]
    pub const fn new(owner: PlayerId, size: TreeSize) -> Self {
        Self {
            owner,
            size,
            dormant: false,
            father: None,
        }
    }

    /// A newly planted seed. Seeds are dormant on the round they land.
    #[must_use]
    pub const fn seedling(owner: PlayerId, father: CellIndex) -> Self {
        Self {
            owner,
            size: TreeSize::Seed,
            dormant: true,
            father: Some(father),
        }
    }

    /// Advance one growth stage. A tall tree stays tall.
    pub fn grow(&mut self) {
        if let Some(next) = self.size.next() {
            self.size = next;
        }
    }
}

/// A SEED action waiting to be planted at the end of the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    /// Player who threw the seed.
    pub owner: PlayerId,
    /// Cell of the seeding tree.
    pub source: CellIndex,
    /// Cell the seed lands on.
    pub target: CellIndex,
}

/// Every tree on the board, keyed by cell index.
///
/// A fixed array: at most one tree per cell, and cloning is a plain copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forest {
    slots: [Option<Tree>; CELL_COUNT],
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl Forest {
    /// An empty forest.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; CELL_COUNT],
        }
    }

    /// The tree on a cell.
    #[must_use]
    pub fn get(&self, cell: CellIndex) -> Option<&Tree> {
        self.slots.get(cell)?.as_ref()
    }

    /// Mutable access to the tree on a cell.
    #[must_use]
    pub fn get_mut(&mut self, cell: CellIndex) -> Option<&mut Tree> {
        self.slots.get_mut(cell)?.as_mut()
    }

    /// Whether a tree stands on the cell.
    #[must_use]
    pub fn is_occupied(&self, cell: CellIndex) -> bool {
        self.get(cell).is_some()
    }

    /// Place a tree, returning whatever stood there before.
    ///
    /// Out-of-range cells are ignored and the tree is handed back.
    pub fn insert(&mut self, cell: CellIndex, tree: Tree) -> Option<Tree> {
        match self.slots.get_mut(cell) {
            Some(slot) => slot.replace(tree),
            None => Some(tree),
        }
    }

    /// Remove and return the tree on a cell.
    pub fn remove(&mut self, cell: CellIndex) -> Option<Tree> {
        self.slots.get_mut(cell)?.take()
    }

    /// Iterate over `(cell, tree)` in cell order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &Tree)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(cell, slot)| slot.as_ref().map(|tree| (cell, tree)))
    }

    /// Iterate mutably over all trees.
    pub fn trees_mut(&mut self) -> impl Iterator<Item = &mut Tree> {
        self.slots.iter_mut().flatten()
    }

    /// Trees owned by one player, in cell order.
    pub fn owned_by(&self, owner: PlayerId) -> impl Iterator<Item = (CellIndex, &Tree)> {
        self.iter().filter(move |(_, tree)| tree.owner == owner)
    }

    /// Number of trees of the given size owned by a player.
    #[must_use]
    pub fn count(&self, owner: PlayerId, size: TreeSize) -> u32 {
        let count = self
            .owned_by(owner)
            .filter(|(_, tree)| tree.size == size)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Total number of trees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Whether the board holds no tree at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
