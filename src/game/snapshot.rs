//! Authoritative state exchange.
//!
//! A [`Snapshot`] carries everything a game host reports each turn: round,
//! nutrients, both players and every tree. A [`Position`] adds the board so
//! a whole game can be stored as one JSON document.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LookupError, PositionError, SnapshotError};
use crate::game::{
    Cell, CellIndex, Forest, GameState, Phase, PlayerId, Sun, Tree, TreeSize, CELL_COUNT,
    MAX_ROUNDS, PLAYER_COUNT, STARTING_NUTRIENTS,
};

/// One tree as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Cell holding the tree.
    pub cell: CellIndex,
    /// Size, `0..=3`.
    pub size: u8,
    /// Owning player.
    pub owner: PlayerId,
    /// Already acted this round.
    pub dormant: bool,
    /// Cell of the tree that threw this one's seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<CellIndex>,
}

/// One player as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Sun energy balance.
    pub sun: u32,
    /// Points scored so far.
    pub score: u32,
    /// Asleep until the next round.
    pub waiting: bool,
}

/// Authoritative game state, independent of the board layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current round.
    pub round: u32,
    /// Shared nutrient pool.
    pub nutrients: u32,
    /// Both players, by id.
    pub players: [PlayerSnapshot; PLAYER_COUNT],
    /// Every tree on the board.
    pub trees: Vec<TreeSnapshot>,
}

/// A board plus a snapshot: a complete, storable game position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Every cell in index order.
    pub cells: Vec<Cell>,
    /// State on top of the board.
    pub snapshot: Snapshot,
}

impl GameState {
    /// Overwrite round, nutrients, players and trees from a snapshot.
    ///
    /// The sun is set to `round % 6`, shadows are recomputed, staged actions
    /// are dropped and the next phase becomes ACTIONS. The state is left
    /// untouched if the snapshot is invalid.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown cells or owners, invalid sizes, two
    /// trees on one cell, or a tree on an unusable cell. A round past
    /// [`MAX_ROUNDS`] or nutrients above [`STARTING_NUTRIENTS`] are rejected
    /// too.
    pub fn ingest(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if snapshot.round > MAX_ROUNDS {
            return Err(SnapshotError::RoundOutOfRange {
                round: snapshot.round,
                max: MAX_ROUNDS,
            });
        }
        if snapshot.nutrients > STARTING_NUTRIENTS {
            return Err(SnapshotError::NutrientsOutOfRange {
                nutrients: snapshot.nutrients,
                max: STARTING_NUTRIENTS,
            });
        }

        let mut forest = Forest::new();
        for record in &snapshot.trees {
            if record.cell >= CELL_COUNT {
                return Err(LookupError::UnknownCell(record.cell).into());
            }
            if usize::from(record.owner) >= PLAYER_COUNT {
                return Err(LookupError::UnknownPlayer(record.owner).into());
            }
            if !self.board.is_usable(record.cell) {
                return Err(SnapshotError::UnusableCell(record.cell));
            }
            let size = TreeSize::from_level(record.size).ok_or(SnapshotError::InvalidSize(record.size))?;

            let tree = Tree {
                owner: record.owner,
                size,
                dormant: record.dormant,
                father: record.father,
            };
            if forest.insert(record.cell, tree).is_some() {
                return Err(SnapshotError::DuplicateTree(record.cell));
            }
        }

        for (player, record) in self.players.iter_mut().zip(&snapshot.players) {
            player.sun = record.sun;
            player.score = record.score;
            player.waiting = record.waiting;
            player.action = None;
        }
        self.forest = forest;
        self.round = snapshot.round;
        self.nutrients = snapshot.nutrients;
        self.sun = Sun::new(u8::try_from(snapshot.round % 6).unwrap_or(0));
        self.recompute_shadows();
        self.next_phase = Phase::Actions;

        debug!(round = self.round, trees = snapshot.trees.len(), "ingested snapshot");
        Ok(())
    }

    /// Export the state in snapshot form.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            round: self.round,
            nutrients: self.nutrients,
            players: self.players.map(|p| PlayerSnapshot {
                sun: p.sun,
                score: p.score,
                waiting: p.waiting,
            }),
            trees: self
                .forest
                .iter()
                .map(|(cell, tree)| TreeSnapshot {
                    cell,
                    size: tree.size.level(),
                    owner: tree.owner,
                    dormant: tree.dormant,
                    father: tree.father,
                })
                .collect(),
        }
    }
}

impl Position {
    /// Capture a game as a position.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            cells: state.board.cells().collect(),
            snapshot: state.snapshot(),
        }
    }

    /// Rebuild a game from this position.
    ///
    /// # Errors
    ///
    /// Returns an error if the cells or the snapshot are invalid.
    pub fn to_state(&self) -> Result<GameState, SnapshotError> {
        let mut state = GameState::new_from_cells(&self.cells)?;
        state.ingest(&self.snapshot)?;
        Ok(state)
    }

    /// Read a position from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PositionError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the position to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PositionError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{check_invariants, Board, Richness};

    fn empty_state() -> GameState {
        GameState::new(Board::uniform(Richness::Ok), Forest::new())
    }

    fn tree(cell: CellIndex, size: u8, owner: PlayerId) -> TreeSnapshot {
        TreeSnapshot {
            cell,
            size,
            owner,
            dormant: false,
            father: None,
        }
    }

    fn snapshot(trees: Vec<TreeSnapshot>) -> Snapshot {
        Snapshot {
            round: 7,
            nutrients: 15,
            players: [
                PlayerSnapshot {
                    sun: 4,
                    score: 10,
                    waiting: false,
                },
                PlayerSnapshot {
                    sun: 2,
                    score: 0,
                    waiting: true,
                },
            ],
            trees,
        }
    }

    #[test]
    fn test_ingest() {
        let mut state = empty_state();
        state.set_action(0, crate::game::Action::Wait).unwrap();
        state
            .ingest(&snapshot(vec![tree(0, 3, 0), tree(20, 1, 1)]))
            .unwrap();

        assert_eq!(state.round(), 7);
        assert_eq!(state.nutrients(), 15);
        assert_eq!(state.sun().orientation(), 1);
        assert_eq!(state.energy(0), 4);
        assert_eq!(state.score(0), 10);
        assert!(state.players()[1].waiting);
        assert!(state.players()[0].action.is_none());
        assert_eq!(state.tree(0).map(|t| t.size), Some(TreeSize::Tall));
        assert_eq!(state.next_phase(), Phase::Actions);
        // Shadows follow the new sun and trees
        let shadowed = state.board().index_of(state.board().coord(0).unwrap().neighbor(1));
        assert_eq!(shadowed.map(|cell| state.shadows().strength(cell)), Some(3));
    }

    #[test]
    fn test_ingest_rejects_bad_records() {
        let mut state = empty_state();
        let before = state;

        assert_eq!(
            state.ingest(&snapshot(vec![tree(40, 1, 0)])),
            Err(SnapshotError::Lookup(LookupError::UnknownCell(40)))
        );
        assert_eq!(
            state.ingest(&snapshot(vec![tree(3, 1, 2)])),
            Err(SnapshotError::Lookup(LookupError::UnknownPlayer(2)))
        );
        assert_eq!(
            state.ingest(&snapshot(vec![tree(3, 4, 0)])),
            Err(SnapshotError::InvalidSize(4))
        );
        assert_eq!(
            state.ingest(&snapshot(vec![tree(3, 1, 0), tree(3, 2, 1)])),
            Err(SnapshotError::DuplicateTree(3))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_ingest_rejects_counters_out_of_range() {
        let mut state = empty_state();
        let before = state;

        let mut late = snapshot(Vec::new());
        late.round = MAX_ROUNDS + 1;
        assert_eq!(
            state.ingest(&late),
            Err(SnapshotError::RoundOutOfRange {
                round: MAX_ROUNDS + 1,
                max: MAX_ROUNDS
            })
        );

        let mut rich = snapshot(Vec::new());
        rich.nutrients = STARTING_NUTRIENTS + 1;
        assert_eq!(
            state.ingest(&rich),
            Err(SnapshotError::NutrientsOutOfRange {
                nutrients: STARTING_NUTRIENTS + 1,
                max: STARTING_NUTRIENTS
            })
        );
        assert_eq!(state, before);

        // The final round itself is a valid, finished position
        let mut last = snapshot(Vec::new());
        last.round = MAX_ROUNDS;
        state.ingest(&last).unwrap();
        assert!(state.is_game_over());
        assert!(check_invariants(&state).is_empty());
    }

    #[test]
    fn test_ingest_rejects_unusable_cell() {
        let mut board = Board::uniform(Richness::Lush);
        board.set_richness(5, Richness::None);
        let mut state = GameState::new(board, Forest::new());
        assert_eq!(
            state.ingest(&snapshot(vec![tree(5, 1, 0)])),
            Err(SnapshotError::UnusableCell(5))
        );
    }

    #[test]
    fn test_snapshot_matches_ingested() {
        let mut state = empty_state();
        let mut dormant = tree(8, 0, 1);
        dormant.dormant = true;
        dormant.father = Some(2);
        let input = snapshot(vec![tree(2, 2, 1), dormant]);
        state.ingest(&input).unwrap();
        assert_eq!(state.snapshot(), input);
    }

    #[test]
    fn test_position_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("position.json");

        let state = GameState::generate(5).unwrap();
        let position = Position::from_state(&state);
        position.save(&path).unwrap();

        let loaded = Position::load(&path).unwrap();
        assert_eq!(loaded, position);
        let rebuilt = loaded.to_state().unwrap();
        assert_eq!(rebuilt.board(), state.board());
        assert_eq!(rebuilt.forest(), state.forest());
    }

    #[test]
    fn test_load_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Position::load(&path), Err(PositionError::Json(_))));
        assert!(matches!(
            Position::load(dir.path().join("missing.json")),
            Err(PositionError::Io(_))
        ));
    }
}
