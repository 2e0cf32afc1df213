//! Series and archive index models.

use std::collections::BTreeMap;

use crate::discovery::sanitize_folder_name;

use super::MatchSummary;

/// A best-of-N grouping of games between the same two teams.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub tournament_id: String,
    pub series_key: String,

    /// Matchup label with the separator spaced out, e.g. "TeamA vs TeamB"
    pub pretty_name: String,

    /// Team with the most game wins; ties go to the first seen
    pub series_winner: String,

    /// Games ordered by game number ascending
    pub games: Vec<MatchSummary>,
}

impl SeriesSummary {
    /// Folder-safe identity, `<series_key>(<winner>)` with hostile
    /// characters stripped.
    pub fn folder_name(&self) -> String {
        sanitize_folder_name(&format!("{}({})", self.series_key, self.series_winner))
    }
}

/// Index entry for one series, as listed on the global page.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesIndexEntry {
    pub pretty_name: String,
    pub series_winner: String,
}

/// All series of one tournament, keyed by folder name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TournamentIndex {
    pub series: BTreeMap<String, SeriesIndexEntry>,
}

/// The whole archive, keyed by tournament name.
///
/// Both maps are ordered, so iterating yields tournaments and series in
/// the order the global index lists them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArchiveIndex {
    pub tournaments: BTreeMap<String, TournamentIndex>,
}

impl ArchiveIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a tournament section exists, even with no series yet.
    pub fn ensure_tournament(&mut self, tournament_id: &str) {
        self.tournaments.entry(tournament_id.to_string()).or_default();
    }

    /// Record a series under its tournament. Two series resolving to the
    /// same folder name collide; the later insert wins, matching the
    /// folder on disk.
    pub fn insert_series(&mut self, series: &SeriesSummary) {
        let entry = SeriesIndexEntry {
            pretty_name: series.pretty_name.clone(),
            series_winner: series.series_winner.clone(),
        };
        self.tournaments
            .entry(series.tournament_id.clone())
            .or_default()
            .series
            .insert(series.folder_name(), entry);
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }
}
