//! Output formatting utilities for CLI.

// Averages over game counts
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use sylva::game::Snapshot;
use sylva::tournament::GameResult;

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Random seed used.
    pub(super) seed: u64,
    /// Winner player ID (null if draw).
    pub(super) winner: Option<u8>,
    /// Rounds completed.
    pub(super) rounds_played: u32,
    /// Engine phases executed.
    pub(super) turns_played: u32,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayerResult>,
    /// Final state.
    pub(super) snapshot: Snapshot,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerResult {
    /// Player ID (0 or 1).
    pub(super) id: u8,
    /// Policy name.
    pub(super) policy: &'static str,
    /// Final score.
    pub(super) score: u32,
    /// Sun left at the end.
    pub(super) sun: u32,
    /// Trees still standing.
    pub(super) trees: u32,
    /// GROW, SEED and COMPLETE actions chosen, in that order.
    pub(super) actions: [u32; 3],
}

impl JsonGameResult {
    /// Create from a GameResult and the final snapshot.
    pub(super) fn from_game_result(result: &GameResult, snapshot: Snapshot) -> Self {
        Self {
            seed: result.seed,
            winner: result.winner,
            rounds_played: result.rounds_played,
            turns_played: result.turns_played,
            players: result
                .player_stats
                .iter()
                .map(|ps| JsonPlayerResult {
                    id: ps.player_id,
                    policy: ps.policy.name(),
                    score: ps.final_score,
                    sun: ps.final_sun,
                    trees: ps.trees,
                    actions: [ps.grows, ps.seeds, ps.completes],
                })
                .collect(),
            snapshot,
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {})\n", result.seed));
    if let Some(winner) = result.winner {
        let name = result
            .player_stats
            .get(usize::from(winner))
            .map_or("unknown", |ps| ps.policy.name());
        output.push_str(&format!("  Winner: Player {winner} ({name})\n"));
    } else {
        output.push_str("  Winner: Draw\n");
    }
    output.push_str(&format!(
        "  Rounds: {} ({} phases)\n\n",
        result.rounds_played, result.turns_played
    ));

    for stats in &result.player_stats {
        output.push_str(&format!(
            "  Player {}: {} points ({}), {} sun, {} trees, {} grow / {} seed / {} complete\n",
            stats.player_id,
            stats.final_score,
            stats.policy,
            stats.final_sun,
            stats.trees,
            stats.grows,
            stats.seeds,
            stats.completes
        ));
    }

    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct TournamentStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games that failed to start.
    pub(super) failed: u64,
    /// Win count per player.
    pub(super) wins: [u64; 2],
    /// Draw count.
    pub(super) draws: u64,
    /// Total score per player.
    total_scores: [f64; 2],
    /// Score sum of squares for std dev calculation.
    score_sq_sums: [f64; 2],
    /// Total completed trees per player.
    total_completes: [u64; 2],
    /// Total rounds across all games.
    total_rounds: u64,
}

impl TournamentStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_rounds += u64::from(result.rounds_played);

        match result.winner {
            Some(winner) => {
                if let Some(wins) = self.wins.get_mut(usize::from(winner)) {
                    *wins += 1;
                }
            }
            None => self.draws += 1,
        }

        for (i, stats) in result.player_stats.iter().enumerate() {
            let score = f64::from(stats.final_score);
            self.total_scores[i] += score;
            self.score_sq_sums[i] += score * score;
            self.total_completes[i] += u64::from(stats.completes);
        }
    }

    /// Merge another partial aggregate into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.failed += other.failed;
        self.draws += other.draws;
        self.total_rounds += other.total_rounds;
        for i in 0..2 {
            self.wins[i] += other.wins[i];
            self.total_scores[i] += other.total_scores[i];
            self.score_sq_sums[i] += other.score_sq_sums[i];
            self.total_completes[i] += other.total_completes[i];
        }
    }

    /// Get win rate for a player (0.0-1.0).
    pub(super) fn win_rate(&self, player_idx: usize) -> f64 {
        self.per_game(self.wins.get(player_idx).map_or(0.0, |&w| w as f64))
    }

    /// Get draw rate (0.0-1.0).
    pub(super) fn draw_rate(&self) -> f64 {
        self.per_game(self.draws as f64)
    }

    /// Get average score for a player.
    pub(super) fn avg_score(&self, player_idx: usize) -> f64 {
        self.per_game(self.total_scores.get(player_idx).copied().unwrap_or(0.0))
    }

    /// Get average number of completed trees for a player.
    pub(super) fn avg_completes(&self, player_idx: usize) -> f64 {
        self.per_game(
            self.total_completes
                .get(player_idx)
                .map_or(0.0, |&c| c as f64),
        )
    }

    /// Get score standard deviation for a player.
    pub(super) fn score_std_dev(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let mean = self.avg_score(player_idx);
        let sq_mean = self.per_game(self.score_sq_sums.get(player_idx).copied().unwrap_or(0.0));
        let variance = sq_mean - mean * mean;
        if variance < 0.0 {
            0.0
        } else {
            variance.sqrt()
        }
    }

    /// Get average game length.
    pub(super) fn avg_rounds(&self) -> f64 {
        self.per_game(self.total_rounds as f64)
    }

    fn per_game(&self, total: f64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total / self.games_played as f64
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total games played.
    games_played: u64,
    /// Games that failed to start.
    failed: u64,
    /// Per-player statistics.
    players: Vec<JsonTournamentPlayer>,
    /// Number of draws.
    draws: u64,
    /// Average game length in rounds.
    avg_rounds: f64,
}

/// JSON-serializable per-player tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentPlayer {
    /// Player index (0-based).
    player: usize,
    /// Policy name.
    policy: String,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average score.
    avg_score: f64,
    /// Score standard deviation.
    score_std_dev: f64,
    /// Average trees completed per game.
    avg_completes: f64,
}

impl JsonTournamentResult {
    /// Create from stats and policy names.
    pub(super) fn from_stats(stats: &TournamentStats, names: &[String]) -> Self {
        let players = names
            .iter()
            .enumerate()
            .map(|(i, name)| JsonTournamentPlayer {
                player: i,
                policy: name.clone(),
                wins: stats.wins.get(i).copied().unwrap_or(0),
                win_rate: stats.win_rate(i),
                avg_score: stats.avg_score(i),
                score_std_dev: stats.score_std_dev(i),
                avg_completes: stats.avg_completes(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            failed: stats.failed,
            players,
            draws: stats.draws,
            avg_rounds: stats.avg_rounds(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, names: &[String]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tournament Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, name) in names.iter().enumerate() {
        let wins = stats.wins.get(i).copied().unwrap_or(0);
        let rate = stats.win_rate(i) * 100.0;
        output.push_str(&format!("  Player {i} ({name}): {rate:.1}% ({wins} wins)\n"));
    }
    output.push_str(&format!(
        "  Draws: {} ({:.1}%)\n\n",
        stats.draws,
        stats.draw_rate() * 100.0
    ));

    output.push_str("Average Scores:\n");
    for (i, name) in names.iter().enumerate() {
        let avg = stats.avg_score(i);
        let std = stats.score_std_dev(i);
        let completes = stats.avg_completes(i);
        output.push_str(&format!(
            "  Player {i} ({name}): {avg:.1} (+/- {std:.1}), {completes:.1} trees completed\n"
        ));
    }

    output.push_str(&format!(
        "\nAverage Game Length: {:.1} rounds\n",
        stats.avg_rounds()
    ));
    if stats.failed > 0 {
        output.push_str(&format!("Failed games: {}\n", stats.failed));
    }

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, names: &[String]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("player,policy,wins,win_rate,avg_score,score_std_dev,avg_completes\n");

    // Data rows
    for (i, name) in names.iter().enumerate() {
        output.push_str(&format!(
            "{},{},{},{:.4},{:.2},{:.2},{:.2}\n",
            i,
            name,
            stats.wins.get(i).copied().unwrap_or(0),
            stats.win_rate(i),
            stats.avg_score(i),
            stats.score_std_dev(i),
            stats.avg_completes(i)
        ));
    }

    output
}
