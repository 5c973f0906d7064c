//! Run command implementation.

use super::output::{format_text, JsonGameResult};
use super::{seed_or_clock, CliError, OutputFormat};
use std::path::PathBuf;
use sylva::game::Position;
use sylva::tournament::{play_game, PolicyKind, TournamentConfig};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the game fails to run or the position cannot be saved.
pub(crate) fn execute(
    seed: Option<u64>,
    policies: [PolicyKind; 2],
    rounds: u32,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed_or_clock(seed);
    let config = TournamentConfig { max_rounds: rounds };

    if !quiet && format == OutputFormat::Text {
        println!("Running game with seed {seed}...");
        println!("Players: {}, {}", policies[0], policies[1]);
        println!();
    }

    let (result, state) = play_game(seed, policies, config)?;

    if let Some(save_path) = save {
        Position::from_state(&state).save(&save_path)?;
        if !quiet && format == OutputFormat::Text {
            println!("Final position saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let json_result = JsonGameResult::from_game_result(&result, state.snapshot());
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
    }

    Ok(())
}
