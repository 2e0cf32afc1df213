//! Match record parsing and normalization.
//!
//! Turns one raw OpenDota-style match JSON into a [`MatchSummary`].
//! Missing or null fields coerce to documented defaults; only a
//! top-level shape mismatch is an error, and the caller skips that one
//! file and keeps going.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::discovery::MatchLocator;
use crate::models::{BenchmarkSet, MatchSummary, PickBanEntry, PlayerStat, Side};

/// Team names used when a record omits them.
pub const DEFAULT_RADIANT_NAME: &str = "Radiant";
pub const DEFAULT_DIRE_NAME: &str = "Dire";

/// Player name used when a record omits it.
pub const DEFAULT_PLAYER_NAME: &str = "Unknown";

/// Errors for a single match record.
#[derive(Debug, Error)]
pub enum MatchParseError {
    #[error("Failed to read match file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Match record has an unexpected shape: {0}")]
    ShapeError(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    radiant_team: Option<RawTeam>,
    dire_team: Option<RawTeam>,
    radiant_win: Option<bool>,
    players: Option<Vec<RawPlayer>>,
    picks_bans: Option<Vec<RawPickBan>>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    hero_id: Option<u32>,
    name: Option<String>,
    kills: Option<u32>,
    deaths: Option<u32>,
    assists: Option<u32>,
    gold_per_min: Option<u32>,
    xp_per_min: Option<u32>,
    lane_efficiency_pct: Option<f64>,
    benchmarks: Option<RawBenchmarks>,
}

#[derive(Debug, Deserialize)]
struct RawBenchmarks {
    last_hits_per_min: Option<RawPercentile>,
    hero_damage_per_min: Option<RawPercentile>,
    tower_damage: Option<RawPercentile>,
}

#[derive(Debug, Deserialize)]
struct RawPercentile {
    pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawPickBan {
    order: Option<u32>,
    is_pick: Option<bool>,
    team: Option<u32>,
    hero_id: Option<u32>,
}

/// Read and parse one match file.
pub fn load_match_summary(
    path: &Path,
    locator: &MatchLocator,
) -> Result<MatchSummary, MatchParseError> {
    let contents = std::fs::read_to_string(path)?;
    parse_match_record(&contents, locator)
}

/// Parse one raw match record into a summary.
pub fn parse_match_record(
    json: &str,
    locator: &MatchLocator,
) -> Result<MatchSummary, MatchParseError> {
    let raw: RawMatch = serde_json::from_str(json)?;

    let mut players = HashMap::new();
    for player in raw.players.unwrap_or_default() {
        // Players without a hero id cannot be keyed; duplicates keep the
        // last occurrence.
        let Some(hero_id) = player.hero_id else {
            continue;
        };
        players.insert(hero_id, convert_player(hero_id, player));
    }

    let mut picks_bans: Vec<PickBanEntry> = raw
        .picks_bans
        .unwrap_or_default()
        .into_iter()
        .map(convert_pick_ban)
        .collect();
    picks_bans.sort_by_key(|entry| entry.order);

    Ok(MatchSummary {
        tournament_id: locator.tournament_id.clone(),
        series_key: locator.series_key.clone(),
        game_number: locator.game_number,
        radiant_team: team_name(raw.radiant_team, DEFAULT_RADIANT_NAME),
        dire_team: team_name(raw.dire_team, DEFAULT_DIRE_NAME),
        radiant_win: raw.radiant_win.unwrap_or(false),
        picks_bans,
        players,
    })
}

fn team_name(team: Option<RawTeam>, default: &str) -> String {
    team.and_then(|t| t.name)
        .unwrap_or_else(|| default.to_string())
}

fn convert_player(hero_id: u32, raw: RawPlayer) -> PlayerStat {
    PlayerStat {
        hero_id,
        name: raw.name.unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()),
        kills: raw.kills.unwrap_or(0),
        deaths: raw.deaths.unwrap_or(0),
        assists: raw.assists.unwrap_or(0),
        gold_per_min: raw.gold_per_min.unwrap_or(0),
        xp_per_min: raw.xp_per_min.unwrap_or(0),
        lane_efficiency_pct: raw.lane_efficiency_pct.unwrap_or(0.0),
        benchmarks: raw.benchmarks.map(convert_benchmarks).unwrap_or_default(),
    }
}

fn convert_benchmarks(raw: RawBenchmarks) -> BenchmarkSet {
    BenchmarkSet {
        last_hits_per_min: percentile(raw.last_hits_per_min),
        hero_damage_per_min: percentile(raw.hero_damage_per_min),
        tower_damage: percentile(raw.tower_damage),
    }
}

fn percentile(raw: Option<RawPercentile>) -> f64 {
    raw.and_then(|p| p.pct).unwrap_or(0.0)
}

fn convert_pick_ban(raw: RawPickBan) -> PickBanEntry {
    let side = if raw.team.unwrap_or(0) == 0 {
        Side::Radiant
    } else {
        Side::Dire
    };

    PickBanEntry {
        order: raw.order.unwrap_or(0),
        side,
        is_pick: raw.is_pick.unwrap_or(false),
        hero_id: raw.hero_id,
    }
}
