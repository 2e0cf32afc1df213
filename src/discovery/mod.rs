//! Input discovery and filename identity resolution.
//!
//! Match files live under `<input_root>/<tournament>/` with names like
//! `1.1_XtremeGaming_vs_Falcons_G1.json`: a dot-delimited series prefix,
//! a free-text matchup body, and a `_G<n>` game number suffix. Anything
//! else in those directories is ignored.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while scanning the input tree.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Input root not found: {0}")]
    InputRootMissing(PathBuf),

    #[error("Input root is not valid UTF-8: {0}")]
    NonUtf8Root(PathBuf),

    #[error("Failed to scan input root: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Identity recovered from one match filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLocator {
    /// Tournament directory name
    pub tournament_id: String,

    /// Series grouping key, `<ordinal>.<body>`
    pub series_key: String,

    /// Free-text matchup label from the filename
    pub matchup_body: String,

    /// Game number from the `_G<n>` suffix
    pub game_number: u32,
}

/// One match file inside a series.
#[derive(Debug, Clone)]
pub struct GameFile {
    pub game_number: u32,
    pub path: PathBuf,
}

/// All files for one series, in ascending game order.
#[derive(Debug, Clone)]
pub struct SeriesFiles {
    pub tournament_id: String,
    pub series_key: String,
    pub matchup_body: String,
    pub games: Vec<GameFile>,
}

/// All series discovered under one tournament directory.
#[derive(Debug, Clone)]
pub struct TournamentFiles {
    pub tournament_id: String,
    pub series: Vec<SeriesFiles>,
}

/// Parse a match filename into its identity parts.
///
/// The prefix before the first underscore encodes the series ordinal as
/// its leading dot-delimited component, so `1.1_TeamA_vs_TeamB_G2.json`
/// resolves to series key `1.TeamA_vs_TeamB`, game 2. Returns `None` for
/// filenames that do not follow the convention; those are skipped during
/// grouping, not treated as errors.
pub fn resolve_match_identity(tournament_id: &str, file_name: &str) -> Option<MatchLocator> {
    let re = Regex::new(r"(?i)^([^_]+)_(.+?)_G(\d+)\.json$").unwrap();
    let caps = re.captures(file_name)?;

    let prefix = caps.get(1)?.as_str();
    let body = caps.get(2)?.as_str();
    let game_number: u32 = caps.get(3)?.as_str().parse().ok()?;

    let series_ordinal = prefix.split('.').next().unwrap_or(prefix);

    Some(MatchLocator {
        tournament_id: tournament_id.to_string(),
        series_key: format!("{}.{}", series_ordinal, body),
        matchup_body: body.to_string(),
        game_number,
    })
}

/// Human-readable matchup label derived from the filename body.
///
/// Exactly one separator token is spaced out: the first of `_vs_`,
/// `_VS_`, `_v_`, then plain `_` that occurs in the body. Lower-priority
/// tokens are left untouched once a higher one matched.
pub fn pretty_matchup_label(body: &str) -> String {
    const SEPARATORS: [(&str, &str); 4] = [
        ("_vs_", " vs "),
        ("_VS_", " vs "),
        ("_v_", " v "),
        ("_", " "),
    ];

    for (token, spaced) in SEPARATORS {
        if body.contains(token) {
            return body.replace(token, spaced);
        }
    }
    body.to_string()
}

/// Strip path-hostile characters and replace spaces with underscores.
pub fn sanitize_folder_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\\' | '/' | ':' | '"' | '*' | '?' | '<' | '>' | '|'))
        .collect::<String>()
        .replace(' ', "_")
}

/// Scan the input root and group match files into series per tournament.
///
/// Tournaments are visited in name order and files in name order within
/// each, so grouping is deterministic. A tournament directory appears in
/// the result as soon as it holds any `.json` file, even when none of
/// them parse as match files. Series keep first-seen order; games within
/// a series are sorted by game number with a stable sort, so duplicate
/// game numbers keep file order.
pub fn scan_input_root(input_root: &Path) -> Result<Vec<TournamentFiles>, DiscoveryError> {
    if !input_root.is_dir() {
        return Err(DiscoveryError::InputRootMissing(input_root.to_path_buf()));
    }

    let Some(root) = input_root.to_str() else {
        return Err(DiscoveryError::NonUtf8Root(input_root.to_path_buf()));
    };

    let pattern = format!("{}/*/*.json", glob::Pattern::escape(root));
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut tournaments: Vec<TournamentFiles> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for entry in glob::glob_with(&pattern, options)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable input entry: {}", e);
                continue;
            }
        };

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(tournament_id) = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(str::to_string)
        else {
            continue;
        };

        let slot = *slots.entry(tournament_id.clone()).or_insert_with(|| {
            tournaments.push(TournamentFiles {
                tournament_id: tournament_id.clone(),
                series: Vec::new(),
            });
            tournaments.len() - 1
        });

        let Some(locator) = resolve_match_identity(&tournament_id, file_name) else {
            debug!("Ignoring non-match file: {}", file_name);
            continue;
        };

        let tournament = &mut tournaments[slot];
        let series_idx = match tournament
            .series
            .iter()
            .position(|s| s.series_key == locator.series_key)
        {
            Some(idx) => idx,
            None => {
                tournament.series.push(SeriesFiles {
                    tournament_id: tournament_id.clone(),
                    series_key: locator.series_key.clone(),
                    matchup_body: locator.matchup_body.clone(),
                    games: Vec::new(),
                });
                tournament.series.len() - 1
            }
        };

        tournament.series[series_idx].games.push(GameFile {
            game_number: locator.game_number,
            path,
        });
    }

    for tournament in &mut tournaments {
        for series in &mut tournament.series {
            series.games.sort_by_key(|game| game.game_number);
        }
    }

    debug!("Discovered {} tournaments", tournaments.len());
    Ok(tournaments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_match_identity() {
        let locator = resolve_match_identity("TI2024", "1.1_TeamA_vs_TeamB_G2.json").unwrap();

        assert_eq!(locator.tournament_id, "TI2024");
        assert_eq!(locator.series_key, "1.TeamA_vs_TeamB");
        assert_eq!(locator.matchup_body, "TeamA_vs_TeamB");
        assert_eq!(locator.game_number, 2);
    }

    #[test]
    fn test_resolve_rejects_non_match_files() {
        assert!(resolve_match_identity("TI2024", "readme.json").is_none());
        assert!(resolve_match_identity("TI2024", "notes.txt").is_none());
        assert!(resolve_match_identity("TI2024", "1.1_TeamA_vs_TeamB_G2.json.bak").is_none());
        assert!(resolve_match_identity("TI2024", "1.1_TeamA_vs_TeamB.json").is_none());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let locator = resolve_match_identity("TI2024", "2.3_TeamA_vs_TeamB_g4.JSON").unwrap();
        assert_eq!(locator.series_key, "2.TeamA_vs_TeamB");
        assert_eq!(locator.game_number, 4);
    }

    #[test]
    fn test_resolve_prefix_without_dot() {
        let locator = resolve_match_identity("Minor", "3_A_vs_B_G1.json").unwrap();
        assert_eq!(locator.series_key, "3.A_vs_B");
    }

    #[test]
    fn test_resolve_ordinal_is_leading_component() {
        // "1.2" encodes series 1, and only the leading component counts.
        let locator = resolve_match_identity("TI2024", "1.2_TeamA_vs_TeamB_G1.json").unwrap();
        assert_eq!(locator.series_key, "1.TeamA_vs_TeamB");
    }

    #[test]
    fn test_pretty_label_lowercase_vs() {
        assert_eq!(pretty_matchup_label("TeamA_vs_TeamB"), "TeamA vs TeamB");
    }

    #[test]
    fn test_pretty_label_uppercase_vs() {
        assert_eq!(pretty_matchup_label("TeamA_VS_TeamB"), "TeamA vs TeamB");
    }

    #[test]
    fn test_pretty_label_single_v() {
        assert_eq!(pretty_matchup_label("TeamA_v_TeamB"), "TeamA v TeamB");
    }

    #[test]
    fn test_pretty_label_plain_underscores() {
        assert_eq!(pretty_matchup_label("TeamA_TeamB"), "TeamA TeamB");
    }

    #[test]
    fn test_pretty_label_first_token_wins() {
        // Once "_vs_" matches, remaining underscores stay as they are.
        assert_eq!(
            pretty_matchup_label("Team_Spirit_vs_Gaimin_Gladiators"),
            "Team_Spirit vs Gaimin_Gladiators"
        );
    }

    #[test]
    fn test_pretty_label_no_separator() {
        assert_eq!(pretty_matchup_label("Showmatch"), "Showmatch");
    }

    #[test]
    fn test_sanitize_strips_hostile_characters() {
        assert_eq!(sanitize_folder_name(r#"a\b/c:d"e*f?g<h>i|j"#), "abcdefghij");
    }

    #[test]
    fn test_sanitize_replaces_spaces() {
        assert_eq!(sanitize_folder_name("Team Spirit"), "Team_Spirit");
        assert_eq!(
            sanitize_folder_name("1.A_vs_B(Team Spirit)"),
            "1.A_vs_B(Team_Spirit)"
        );
    }

    fn write_match_file(root: &Path, tournament: &str, name: &str) {
        let dir = root.join(tournament);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), "{}").unwrap();
    }

    #[test]
    fn test_scan_groups_files_into_series() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write_match_file(root, "TI2024", "1.1_TeamA_vs_TeamB_G1.json");
        write_match_file(root, "TI2024", "1.1_TeamA_vs_TeamB_G2.json");
        write_match_file(root, "TI2024", "2.1_TeamC_vs_TeamD_G1.json");
        write_match_file(root, "TI2024", "notes.txt");

        let tournaments = scan_input_root(root).unwrap();

        assert_eq!(tournaments.len(), 1);
        let ti = &tournaments[0];
        assert_eq!(ti.tournament_id, "TI2024");
        assert_eq!(ti.series.len(), 2);

        assert_eq!(ti.series[0].series_key, "1.TeamA_vs_TeamB");
        assert_eq!(ti.series[0].games.len(), 2);
        assert_eq!(ti.series[0].games[0].game_number, 1);
        assert_eq!(ti.series[0].games[1].game_number, 2);

        assert_eq!(ti.series[1].series_key, "2.TeamC_vs_TeamD");
        assert_eq!(ti.series[1].games.len(), 1);
    }

    #[test]
    fn test_scan_sorts_games_by_number() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        // Name order puts G10 before G2; game order must not.
        write_match_file(root, "TI2024", "1.1_A_vs_B_G10.json");
        write_match_file(root, "TI2024", "1.1_A_vs_B_G2.json");

        let tournaments = scan_input_root(root).unwrap();
        let games = &tournaments[0].series[0].games;
        assert_eq!(games[0].game_number, 2);
        assert_eq!(games[1].game_number, 10);
    }

    #[test]
    fn test_scan_tournaments_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write_match_file(root, "Riyadh", "1.1_A_vs_B_G1.json");
        write_match_file(root, "Dreamleague", "1.1_C_vs_D_G1.json");

        let tournaments = scan_input_root(root).unwrap();
        assert_eq!(tournaments[0].tournament_id, "Dreamleague");
        assert_eq!(tournaments[1].tournament_id, "Riyadh");
    }

    #[test]
    fn test_scan_keeps_tournament_with_no_match_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write_match_file(root, "Empty", "readme.json");

        let tournaments = scan_input_root(root).unwrap();
        assert_eq!(tournaments.len(), 1);
        assert_eq!(tournaments[0].tournament_id, "Empty");
        assert!(tournaments[0].series.is_empty());
    }

    #[test]
    fn test_scan_ignores_files_at_root_level() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("1.1_A_vs_B_G1.json"), "{}").unwrap();
        write_match_file(root, "TI2024", "1.1_A_vs_B_G1.json");

        let tournaments = scan_input_root(root).unwrap();
        assert_eq!(tournaments.len(), 1);
        assert_eq!(tournaments[0].tournament_id, "TI2024");
    }

    #[test]
    fn test_scan_retains_duplicate_game_numbers() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        // Same series and game number under two prefixes; both stay.
        write_match_file(root, "TI2024", "1.1_A_vs_B_G1.json");
        write_match_file(root, "TI2024", "1.2_A_vs_B_G1.json");

        let tournaments = scan_input_root(root).unwrap();
        let series = &tournaments[0].series;
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].games.len(), 2);
        assert_eq!(series[0].games[0].game_number, 1);
        assert_eq!(series[0].games[1].game_number, 1);
    }

    #[test]
    fn test_scan_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = scan_input_root(&missing);
        assert!(matches!(result, Err(DiscoveryError::InputRootMissing(_))));
    }
}
