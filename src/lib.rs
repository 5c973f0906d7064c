// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Sylva: a deterministic simulator for a two-player hexagonal forest game.
//!
//! Two players grow trees on a 37-cell hex board. Trees gather sun unless a
//! taller neighbour shades them, spend it to grow and throw seeds, and are
//! finally harvested for points drawn from a shrinking nutrient pool.
//!
//! The crate provides:
//! - An exact rules engine that advances one phase per call
//! - A legal move enumerator for search and evaluation agents
//! - Snapshot ingestion so a live host can overwrite the state each turn
//! - A seeded game driver with simple built-in policies
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Game Driver (tournament)        │
//! ├─────────────────────────────────────┤
//! │   Turn Engine / Move Enumerator     │
//! ├─────────────────────────────────────┤
//! │  Board, Trees, Sun and Shadows      │
//! └─────────────────────────────────────┘
//! ```
//!
//! `GameState` is a flat `Copy` value: cloning it for look-ahead shares
//! nothing with the original.

pub mod error;
pub mod game;
pub mod tournament;

pub use error::{ActionError, EngineError, IllegalAction, LookupError};

// Re-export key game types at crate root for convenience
pub use game::{Action, Board, CubeCoord, GameState, Phase, Player, PlayerId, Tree, TreeSize};
