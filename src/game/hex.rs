//! Cube coordinates on the hexagonal grid.

use serde::{Deserialize, Serialize};

/// Unit vectors for the six directions, clockwise starting east-north-east.
///
/// The sun orientation indexes into this table, so shadows fall along
/// `DIRECTIONS[orientation]`.
pub const DIRECTIONS: [(i8, i8, i8); 6] = [
    (1, -1, 0),
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
];

/// A position on the hex grid.
///
/// Invariant: `x + y + z == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeCoord {
    x: i8,
    y: i8,
    z: i8,
}

impl CubeCoord {
    /// The center of the board.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a coordinate from its three components.
    ///
    /// Returns `None` unless `x + y + z == 0`.
    #[must_use]
    pub const fn new(x: i8, y: i8, z: i8) -> Option<Self> {
        if x as i16 + y as i16 + z as i16 == 0 {
            Some(Self { x, y, z })
        } else {
            None
        }
    }

    /// Create a coordinate from two components; the third is derived.
    #[must_use]
    pub const fn from_xy(x: i8, y: i8) -> Self {
        Self { x, y, z: -x - y }
    }

    /// X component.
    #[must_use]
    pub const fn x(self) -> i8 {
        self.x
    }

    /// Y component.
    #[must_use]
    pub const fn y(self) -> i8 {
        self.y
    }

    /// Z component.
    #[must_use]
    pub const fn z(self) -> i8 {
        self.z
    }

    /// The adjacent coordinate in `direction` (taken modulo 6).
    #[must_use]
    pub const fn neighbor(self, direction: usize) -> Self {
        self.neighbor_at(direction, 1)
    }

    /// The coordinate `distance` steps away in `direction` (taken modulo 6).
    #[must_use]
    pub const fn neighbor_at(self, direction: usize, distance: i8) -> Self {
        let (dx, dy, dz) = DIRECTIONS[direction % 6];
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
            z: self.z + dz * distance,
        }
    }

    /// Hex distance between two coordinates.
    #[must_use]
    pub const fn distance_to(self, other: Self) -> u8 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        (dx + dy + dz) / 2
    }

    /// Ring number: distance from the center.
    #[must_use]
    pub const fn ring(self) -> u8 {
        self.distance_to(Self::ORIGIN)
    }

    /// Point reflection through the center.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Every coordinate within `radius` of this one, including itself.
    pub fn within(self, radius: u8) -> impl Iterator<Item = CubeCoord> {
        #[allow(clippy::cast_possible_wrap)]
        let n = radius as i8;
        (-n..=n).flat_map(move |dx| {
            let low = (-n).max(-dx - n);
            let high = n.min(-dx + n);
            (low..=high).map(move |dy| Self::from_xy(self.x + dx, self.y + dy))
        })
    }
}

impl std::fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
