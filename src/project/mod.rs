//! Page view-model projection.
//!
//! Maps normalized summaries into the shapes the renderer consumes:
//! hero ids become names and icon files, drafts split into side columns,
//! and games become links. The renderer never touches raw records.

use crate::heroes::HeroDirectory;
use crate::models::{MatchSummary, PickBanEntry, PlayerStat, SeriesSummary, Side};

/// One draft action prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftCell {
    /// Zero-based draft position; displayed one-based
    pub order: u32,

    pub is_pick: bool,
    pub hero_name: String,

    /// Icon file name, empty when the hero is unknown
    pub icon_file: String,

    /// Stats for the picking player, when the record had them
    pub player: Option<PlayerStat>,
}

/// View model for one game page.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPage {
    pub title: String,
    pub file_name: String,
    pub game_number: u32,
    pub radiant: Vec<DraftCell>,
    pub dire: Vec<DraftCell>,
}

impl MatchPage {
    /// Pair the two sides row by row, padding the shorter side.
    pub fn rows(&self) -> Vec<(Option<&DraftCell>, Option<&DraftCell>)> {
        let len = self.radiant.len().max(self.dire.len());
        (0..len)
            .map(|i| (self.radiant.get(i), self.dire.get(i)))
            .collect()
    }
}

/// Link to one game from its series index.
#[derive(Debug, Clone, PartialEq)]
pub struct GameLink {
    pub game_number: u32,
    pub winner: String,
    pub file_name: String,
}

/// View model for one series index page.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPage {
    pub pretty_name: String,
    pub series_winner: String,
    pub folder_name: String,
    pub games: Vec<GameLink>,
}

/// Project one match into its page view model.
pub fn project_match(summary: &MatchSummary, heroes: &HeroDirectory) -> MatchPage {
    let mut radiant = Vec::new();
    let mut dire = Vec::new();

    for entry in &summary.picks_bans {
        let cell = draft_cell(entry, summary, heroes);
        match entry.side {
            Side::Radiant => radiant.push(cell),
            Side::Dire => dire.push(cell),
        }
    }

    radiant.sort_by_key(|cell| cell.order);
    dire.sort_by_key(|cell| cell.order);

    MatchPage {
        title: page_title(summary),
        file_name: summary.page_file_name(),
        game_number: summary.game_number,
        radiant,
        dire,
    }
}

/// Project one series into its index view model.
pub fn project_series(series: &SeriesSummary) -> SeriesPage {
    let games = series
        .games
        .iter()
        .map(|game| GameLink {
            game_number: game.game_number,
            winner: game.winner_name().to_string(),
            file_name: game.page_file_name(),
        })
        .collect();

    SeriesPage {
        pretty_name: series.pretty_name.clone(),
        series_winner: series.series_winner.clone(),
        folder_name: series.folder_name(),
        games,
    }
}

fn draft_cell(entry: &PickBanEntry, summary: &MatchSummary, heroes: &HeroDirectory) -> DraftCell {
    let (hero_name, icon_file) = match entry.hero_id {
        Some(id) => (heroes.display_name(id), heroes.icon_file(id).to_string()),
        None => ("Unknown".to_string(), String::new()),
    };

    // Only picks carry player cards; bans stay name-only even when the
    // hero id happens to be present in the players map.
    let player = if entry.is_pick {
        entry
            .hero_id
            .and_then(|id| summary.players.get(&id))
            .cloned()
    } else {
        None
    };

    DraftCell {
        order: entry.order,
        is_pick: entry.is_pick,
        hero_name,
        icon_file,
        player,
    }
}

/// Exactly one side of the title carries the winner mark.
fn page_title(summary: &MatchSummary) -> String {
    if summary.radiant_win {
        format!("{} (Winner) vs {}", summary.radiant_team, summary.dire_team)
    } else {
        format!("{} vs {} (Winner)", summary.radiant_team, summary.dire_team)
    }
}
