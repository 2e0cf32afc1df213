//! Series aggregation.
//!
//! Folds the parsed games of one series into a [`SeriesSummary`] and
//! picks the series winner by majority of game wins.

use thiserror::Error;

use crate::discovery::pretty_matchup_label;
use crate::models::{MatchSummary, SeriesSummary};

/// A series with zero usable games; the caller omits it from output.
#[derive(Debug, Error)]
#[error("Series {series_key} has no usable games")]
pub struct EmptySeriesError {
    pub series_key: String,
}

/// Aggregate the games of one series.
///
/// Games are ordered by game number before tallying, and the tally keeps
/// first-seen order, so an exact tie goes to the team whose first win
/// came in the earliest game.
pub fn aggregate_series(
    tournament_id: &str,
    series_key: &str,
    matchup_body: &str,
    mut games: Vec<MatchSummary>,
) -> Result<SeriesSummary, EmptySeriesError> {
    if games.is_empty() {
        return Err(EmptySeriesError {
            series_key: series_key.to_string(),
        });
    }

    games.sort_by_key(|game| game.game_number);
    let series_winner = majority_winner(&games);

    Ok(SeriesSummary {
        tournament_id: tournament_id.to_string(),
        series_key: series_key.to_string(),
        pretty_name: pretty_matchup_label(matchup_body),
        series_winner,
        games,
    })
}

/// Team with the most game wins; ties break to the first occurrence.
fn majority_winner(games: &[MatchSummary]) -> String {
    let mut tally: Vec<(&str, u32)> = Vec::new();
    for game in games {
        let winner = game.winner_name();
        match tally.iter_mut().find(|(name, _)| *name == winner) {
            Some((_, count)) => *count += 1,
            None => tally.push((winner, 1)),
        }
    }

    let mut best = &tally[0];
    for candidate in &tally[1..] {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }
    best.0.to_string()
}
