//! Match-level data models.

use std::collections::HashMap;
use std::fmt;

use crate::discovery::sanitize_folder_name;

/// One of the two sides in a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Radiant,
    Dire,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Radiant => write!(f, "Radiant"),
            Side::Dire => write!(f, "Dire"),
        }
    }
}

/// One drafting action, pick or ban, with its global sequence position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickBanEntry {
    /// Zero-based position in the draft across both sides
    pub order: u32,

    /// Side that performed the action
    pub side: Side,

    /// Pick when true, ban otherwise
    pub is_pick: bool,

    /// Hero involved; absent in truncated records
    pub hero_id: Option<u32>,
}

/// Benchmark percentiles against a reference population, 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BenchmarkSet {
    pub last_hits_per_min: f64,
    pub hero_damage_per_min: f64,
    pub tower_damage: f64,
}

impl BenchmarkSet {
    /// Display labels paired with their values, in page order.
    pub fn labeled(&self) -> [(&'static str, f64); 3] {
        [
            ("LH", self.last_hits_per_min),
            ("HDM", self.hero_damage_per_min),
            ("TDM", self.tower_damage),
        ]
    }
}

/// Per-player performance for one picked hero.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStat {
    pub hero_id: u32,
    pub name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold_per_min: u32,
    pub xp_per_min: u32,

    /// Lane efficiency as a fraction, 0.0 to 1.0
    pub lane_efficiency_pct: f64,

    pub benchmarks: BenchmarkSet,
}

impl PlayerStat {
    /// Kills, deaths and assists in the usual `k/d/a` form.
    pub fn kda(&self) -> String {
        format!("{}/{}/{}", self.kills, self.deaths, self.assists)
    }

    /// Gold and experience per minute as `gpm/xpm`.
    pub fn gpm_xpm(&self) -> String {
        format!("{}/{}", self.gold_per_min, self.xp_per_min)
    }
}

/// One game, normalized from a raw match record.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub tournament_id: String,
    pub series_key: String,
    pub game_number: u32,
    pub radiant_team: String,
    pub dire_team: String,
    pub radiant_win: bool,

    /// Draft actions sorted by `order` ascending
    pub picks_bans: Vec<PickBanEntry>,

    /// Player stats keyed by picked hero id
    pub players: HashMap<u32, PlayerStat>,
}

impl MatchSummary {
    /// Name of the team on the winning side.
    pub fn winner_name(&self) -> &str {
        if self.radiant_win {
            &self.radiant_team
        } else {
            &self.dire_team
        }
    }

    /// File name of this game's page, `Game<n>_<winner>.html`.
    pub fn page_file_name(&self) -> String {
        format!(
            "Game{}_{}.html",
            self.game_number,
            sanitize_folder_name(self.winner_name())
        )
    }
}
