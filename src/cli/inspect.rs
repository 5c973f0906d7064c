//! Inspect command implementation.

use super::CliError;
use std::path::Path;
use sylva::game::{Position, PLAYER_COUNT};
use sylva::GameState;

/// Execute the inspect command.
///
/// # Errors
///
/// Returns an error if the position cannot be loaded or names an unknown
/// player.
pub(crate) fn execute(path: &Path, player: Option<u8>) -> Result<(), CliError> {
    let position = Position::load(path)?;
    let state = position.to_state()?;

    print!("{}", describe(&state, player)?);
    Ok(())
}

/// Summarise a state and list legal moves, one per line.
fn describe(state: &GameState, player: Option<u8>) -> Result<String, CliError> {
    let mut output = String::new();
    output.push_str(&format!(
        "Round {} | nutrients {} | sun {}\n",
        state.round(),
        state.nutrients(),
        state.sun().orientation()
    ));

    let ids: Vec<u8> = match player {
        Some(id) => vec![id],
        None => (0..PLAYER_COUNT).filter_map(|id| u8::try_from(id).ok()).collect(),
    };

    for id in ids {
        let moves = state.legal_moves(id)?;
        let info = state.player(id)?;
        output.push_str(&format!(
            "\nPlayer {id}: {} points, {} sun{}\n",
            info.score,
            info.sun,
            if info.waiting { ", waiting" } else { "" }
        ));
        for action in moves {
            output.push_str(&format!("  {action}\n"));
        }
    }

    Ok(output)
}
