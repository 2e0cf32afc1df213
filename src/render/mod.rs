//! HTML rendering.
//!
//! Builds the three page kinds as plain strings: per-game draft pages,
//! per-series index pages, and the global match list. Interpolated text
//! is HTML-escaped and hrefs are percent-encoded; the markup skeleton
//! itself is fixed.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::{ArchiveIndex, BenchmarkSet};
use crate::project::{DraftCell, MatchPage, SeriesPage};

/// Characters left bare in hrefs; everything else is percent-encoded.
const HREF_KEEP: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Styles for per-game draft pages.
pub const PAGE_CSS: &str = "
body { font-family: Arial, sans-serif; background:#101010; color:#f0f0f0; text-align:center; margin:0; padding:8px; }
a.back-link { display:inline-block; margin:10px 0; color:#66b3ff; text-decoration:none; }
h2 { margin-top:6px; margin-bottom:8px; font-size:20px; }
table { margin:10px auto; border-collapse:collapse; width:98%; max-width:900px; background:#1b1b1b; border-radius:8px; overflow:hidden; }
th, td { border:1px solid #333; padding:12px; vertical-align:top; width:50%; }
.player-info { display:flex; align-items:center; gap:12px; margin-top:6px; justify-content:flex-start; }
.hero-image img { width:80px; border-radius:6px; }
.stats { text-align:left; font-size:13px; color:#ccc; line-height:1.4em; display:flex; flex-direction:column; gap:3px; }
.player-name { color:#fff; margin-bottom:4px; font-weight:600; }
.stat-row { display:flex; justify-content:space-between; width:220px; }
.stat-row .label { color:#aaa; }
.stat-row .value { color:#fff; text-align:right; }
.benchmarks { font-size:12px; color:#999; margin-top:4px; }
@media (max-width:600px) { .player-info { flex-wrap:wrap; gap:8px; } .stat-row { width:100%; justify-content:space-between; } }
";

/// Styles shared by the series indexes and the global match list.
pub const SERIES_INDEX_CSS: &str = "
body { background:#101010; color:#f0f0f0; font-family:Arial, sans-serif; text-align:center; }
a { color:#66b3ff; text-decoration:none; }
ul { list-style:none; padding:0; margin-top:20px; }
li { margin:10px 0; font-size:16px; }
";

pub const MAIN_INDEX_CSS: &str = SERIES_INDEX_CSS;

const BACK_LINK: &str =
    r#"<a class="back-link" href="../../../main/index.html">⬅ Back to Match List</a>"#;

/// Render one game page.
pub fn render_match_page(page: &MatchPage, image_base_path: &str) -> String {
    let title = escape_html(&page.title);

    let mut html = Vec::new();
    push_head(&mut html, &format!("{} - Picks &amp; Bans", title), PAGE_CSS);
    html.push(BACK_LINK.to_string());
    html.push(format!("<h2>{}</h2>", title));
    html.push("<table>".to_string());
    html.push("<tr><th>Radiant</th><th>Dire</th></tr>".to_string());

    for (left, right) in page.rows() {
        html.push("<tr>".to_string());
        html.push(format!(
            "<td>{}</td><td>{}</td>",
            cell_html(left, image_base_path),
            cell_html(right, image_base_path)
        ));
        html.push("</tr>".to_string());
    }

    html.push("</table></body></html>".to_string());
    html.join("\n")
}

/// Render one series index page.
pub fn render_series_index(series: &SeriesPage) -> String {
    let pretty = escape_html(&series.pretty_name);

    let mut html = Vec::new();
    push_head(&mut html, &format!("{} - Series", pretty), SERIES_INDEX_CSS);
    html.push(BACK_LINK.to_string());
    html.push(format!(
        "<h2>{} — Series Winner: {}</h2>",
        pretty,
        escape_html(&series.series_winner)
    ));
    html.push("<ul>".to_string());

    for game in &series.games {
        html.push(format!(
            r#"<li><a href="./{}">Game{} — {}</a></li>"#,
            encode_href(&game.file_name),
            game.game_number,
            escape_html(&game.winner)
        ));
    }

    html.push("</ul></body></html>".to_string());
    html.join("\n")
}

/// Render the global match list. An empty archive still renders the
/// heading, so the page exists even before any data arrives.
pub fn render_archive_index(index: &ArchiveIndex) -> String {
    let mut html = Vec::new();
    push_head(&mut html, "Dota 2 Match List", MAIN_INDEX_CSS);
    html.push("<h2>Dota 2 Match List</h2>".to_string());

    for (tournament_id, tournament) in &index.tournaments {
        html.push(format!("<h3>{}</h3><ul>", escape_html(tournament_id)));
        for (folder_name, entry) in &tournament.series {
            let href = encode_href(&format!(
                "../matches/{}/{}/index.html",
                tournament_id, folder_name
            ));
            html.push(format!(
                r#"<li><a href="{}">{} — Winner: {}</a></li>"#,
                href,
                escape_html(&entry.pretty_name),
                escape_html(&entry.series_winner)
            ));
        }
        html.push("</ul>".to_string());
    }

    html.push("</body></html>".to_string());
    html.join("\n")
}

fn push_head(html: &mut Vec<String>, title: &str, css: &str) {
    html.push("<!doctype html><html><head>".to_string());
    html.push(r#"<meta charset="utf-8">"#.to_string());
    html.push(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#.to_string());
    html.push(format!("<title>{}</title>", title));
    html.push(format!("<style>{}</style></head><body>", css));
}

fn cell_html(cell: Option<&DraftCell>, image_base_path: &str) -> String {
    let Some(cell) = cell else {
        return String::new();
    };

    let order = cell.order + 1;
    let label = if cell.is_pick {
        format!("<b><span style='color:#00ff66'>{}. Pick:</span></b>", order)
    } else {
        format!("<b><span style='color:#ff3333'>{}. Ban:</span></b>", order)
    };

    let body = if cell.is_pick {
        match &cell.player {
            Some(player) => {
                let img_src = format!("{}/{}", image_base_path, cell.icon_file);
                format!(
                    r#"
                <div class='player-info'>
                    <div class='hero-image'><img src="{src}" alt=""></div>
                    <div class='stats'>
                        <div class='player-name'>{name}</div>
                        <div class='stat-row'><span class='label'>KDA:</span><span class='value'>{kda}</span></div>
                        <div class='stat-row'><span class='label'>GPM/XPM:</span><span class='value'>{gpm_xpm}</span></div>
                        <div class='stat-row'><span class='label'>Lane Efficiency:</span><span class='value'>{lane_eff}</span></div>
                        <div class='benchmarks'>{benchmarks}</div>
                    </div>
                </div>"#,
                    src = escape_html(&img_src),
                    name = escape_html(&player.name),
                    kda = player.kda(),
                    gpm_xpm = player.gpm_xpm(),
                    lane_eff = format_percent(player.lane_efficiency_pct),
                    benchmarks = benchmark_line(&player.benchmarks),
                )
            }
            None => "<div class='player-info'><i>No player info</i></div>".to_string(),
        }
    } else {
        format!(
            "<div class='player-info'><div class='hero-name'><b>{}</b></div></div>",
            escape_html(&cell.hero_name)
        )
    };

    format!("{}{}", label, body)
}

/// Format a 0-1 fraction as a percentage with one decimal.
fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn benchmark_line(benchmarks: &BenchmarkSet) -> String {
    let parts: Vec<String> = benchmarks
        .labeled()
        .iter()
        .map(|(label, value)| format!("{} {}", label, format_percent(*value)))
        .collect();
    parts.join(" | ")
}

/// Escape text for interpolation into HTML.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Percent-encode a relative href, keeping path separators.
fn encode_href(href: &str) -> String {
    utf8_percent_encode(href, HREF_KEEP).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heroes::HeroDirectory;
    use crate::models::{
        MatchSummary, PickBanEntry, PlayerStat, SeriesIndexEntry, SeriesSummary, Side,
    };
    use crate::project::{project_match, project_series};
    use pretty_assertions::assert_eq;
    use scraper::{Html, Selector};
    use std::collections::HashMap;

    const IMAGE_BASE: &str = "../../../dictionaries/image";

    fn heroes() -> HeroDirectory {
        HeroDirectory::from_json(
            r#"[{"id": 8, "name": "npc_dota_hero_juggernaut", "localized_name": "Juggernaut"}]"#,
        )
        .unwrap()
    }

    fn player(hero_id: u32, name: &str) -> PlayerStat {
        PlayerStat {
            hero_id,
            name: name.to_string(),
            kills: 10,
            deaths: 1,
            assists: 7,
            gold_per_min: 812,
            xp_per_min: 790,
            lane_efficiency_pct: 0.845,
            benchmarks: BenchmarkSet {
                last_hits_per_min: 0.95,
                hero_damage_per_min: 0.724,
                tower_damage: 0.4,
            },
        }
    }

    fn summary() -> MatchSummary {
        let mut players = HashMap::new();
        players.insert(8, player(8, "Yatoro"));
        MatchSummary {
            tournament_id: "TI2024".to_string(),
            series_key: "1.TeamA_vs_TeamB".to_string(),
            game_number: 1,
            radiant_team: "TeamA".to_string(),
            dire_team: "TeamB".to_string(),
            radiant_win: true,
            picks_bans: vec![
                PickBanEntry {
                    order: 0,
                    side: Side::Radiant,
                    is_pick: false,
                    hero_id: Some(8),
                },
                PickBanEntry {
                    order: 1,
                    side: Side::Dire,
                    is_pick: true,
                    hero_id: Some(99),
                },
                PickBanEntry {
                    order: 2,
                    side: Side::Radiant,
                    is_pick: true,
                    hero_id: Some(8),
                },
            ],
            players,
        }
    }

    fn rendered_match() -> String {
        let page = project_match(&summary(), &heroes());
        render_match_page(&page, IMAGE_BASE)
    }

    #[test]
    fn test_match_page_skeleton() {
        let html = rendered_match();

        assert!(html.starts_with("<!doctype html><html><head>"));
        assert!(html.contains("<title>TeamA (Winner) vs TeamB - Picks &amp; Bans</title>"));
        assert!(html.contains("⬅ Back to Match List"));
        assert!(html.ends_with("</table></body></html>"));
    }

    #[test]
    fn test_match_page_table_structure() {
        let html = rendered_match();
        let doc = Html::parse_document(&html);

        let rows = Selector::parse("table tr").unwrap();
        // Header plus two draft rows (two radiant actions, one dire).
        assert_eq!(doc.select(&rows).count(), 3);

        let headers = Selector::parse("th").unwrap();
        let titles: Vec<String> = doc
            .select(&headers)
            .map(|th| th.text().collect::<String>())
            .collect();
        assert_eq!(titles, vec!["Radiant", "Dire"]);
    }

    #[test]
    fn test_pick_cell_carries_player_card() {
        let html = rendered_match();
        let doc = Html::parse_document(&html);

        let names = Selector::parse(".player-name").unwrap();
        let name: String = doc.select(&names).next().unwrap().text().collect();
        assert_eq!(name, "Yatoro");

        let values = Selector::parse(".stat-row .value").unwrap();
        let stats: Vec<String> = doc
            .select(&values)
            .map(|v| v.text().collect::<String>())
            .collect();
        assert_eq!(stats, vec!["10/1/7", "812/790", "84.5%"]);

        let benches = Selector::parse(".benchmarks").unwrap();
        let bench: String = doc.select(&benches).next().unwrap().text().collect();
        assert_eq!(bench, "LH 95.0% | HDM 72.4% | TDM 40.0%");
    }

    #[test]
    fn test_pick_cell_image_source() {
        let html = rendered_match();
        let doc = Html::parse_document(&html);

        let images = Selector::parse(".hero-image img").unwrap();
        let src = doc
            .select(&images)
            .next()
            .unwrap()
            .value()
            .attr("src")
            .unwrap();
        assert_eq!(src, "../../../dictionaries/image/juggernaut.png");
    }

    #[test]
    fn test_pick_without_player_shows_placeholder() {
        let html = rendered_match();
        assert!(html.contains("<div class='player-info'><i>No player info</i></div>"));
    }

    #[test]
    fn test_ban_cell_is_name_only() {
        let html = rendered_match();
        assert!(html.contains("1. Ban:"));
        assert!(html.contains("<div class='hero-name'><b>Juggernaut</b></div>"));
    }

    #[test]
    fn test_draft_labels_are_one_based() {
        let html = rendered_match();
        assert!(html.contains("1. Ban:"));
        assert!(html.contains("2. Pick:"));
        assert!(html.contains("3. Pick:"));
    }

    #[test]
    fn test_team_names_are_escaped() {
        let mut s = summary();
        s.radiant_team = "Team <Spirit> & Co".to_string();
        let page = project_match(&s, &heroes());
        let html = render_match_page(&page, IMAGE_BASE);

        assert!(html.contains("Team &lt;Spirit&gt; &amp; Co"));
        assert!(!html.contains("<Spirit>"));
    }

    fn series_page() -> SeriesPage {
        let mut games = Vec::new();
        for (n, radiant_win) in [(1, true), (2, false)] {
            let mut g = summary();
            g.game_number = n;
            g.radiant_win = radiant_win;
            g.picks_bans.clear();
            games.push(g);
        }
        project_series(&SeriesSummary {
            tournament_id: "TI2024".to_string(),
            series_key: "1.TeamA_vs_TeamB".to_string(),
            pretty_name: "TeamA vs TeamB".to_string(),
            series_winner: "TeamA".to_string(),
            games,
        })
    }

    #[test]
    fn test_series_index_heading_and_links() {
        let html = render_series_index(&series_page());

        assert!(html.contains("<title>TeamA vs TeamB - Series</title>"));
        assert!(html.contains("<h2>TeamA vs TeamB — Series Winner: TeamA</h2>"));
        assert!(html.contains(r#"<li><a href="./Game1_TeamA.html">Game1 — TeamA</a></li>"#));
        assert!(html.contains(r#"<li><a href="./Game2_TeamB.html">Game2 — TeamB</a></li>"#));
        assert!(html.contains("⬅ Back to Match List"));
    }

    #[test]
    fn test_series_index_links_are_percent_encoded() {
        let mut page = series_page();
        page.games[0].file_name = "Game1_Team Spirit(CN).html".to_string();
        let html = render_series_index(&page);

        assert!(html.contains(r#"href="./Game1_Team%20Spirit%28CN%29.html""#));
    }

    fn archive_index() -> ArchiveIndex {
        let mut index = ArchiveIndex::new();
        index
            .tournaments
            .entry("TI2024".to_string())
            .or_default()
            .series
            .insert(
                "1.TeamA_vs_TeamB(TeamA)".to_string(),
                SeriesIndexEntry {
                    pretty_name: "TeamA vs TeamB".to_string(),
                    series_winner: "TeamA".to_string(),
                },
            );
        index
    }

    #[test]
    fn test_main_index_lists_series() {
        let html = render_archive_index(&archive_index());

        assert!(html.contains("<title>Dota 2 Match List</title>"));
        assert!(html.contains("<h2>Dota 2 Match List</h2>"));
        assert!(html.contains("<h3>TI2024</h3><ul>"));
        assert!(html.contains(
            r#"<li><a href="../matches/TI2024/1.TeamA_vs_TeamB%28TeamA%29/index.html">TeamA vs TeamB — Winner: TeamA</a></li>"#
        ));
    }

    #[test]
    fn test_main_index_has_no_back_link() {
        let html = render_archive_index(&archive_index());
        assert!(!html.contains("back-link"));
    }

    #[test]
    fn test_main_index_keeps_path_separators() {
        let html = render_archive_index(&archive_index());
        assert!(html.contains("../matches/TI2024/"));
        assert!(!html.contains("%2F"));
    }

    #[test]
    fn test_main_index_renders_when_empty() {
        let html = render_archive_index(&ArchiveIndex::new());

        assert!(html.contains("<h2>Dota 2 Match List</h2>"));
        assert!(!html.contains("<h3>"));
        assert!(html.ends_with("</body></html>"));
    }

    #[test]
    fn test_main_index_tournament_order() {
        let mut index = archive_index();
        index.ensure_tournament("Dreamleague");
        let html = render_archive_index(&index);

        let dream = html.find("<h3>Dreamleague</h3>").unwrap();
        let ti = html.find("<h3>TI2024</h3>").unwrap();
        assert!(dream < ti);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.845), "84.5%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a&b<c>d"e'f"#), "a&amp;b&lt;c&gt;d&quot;e&#39;f");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(encode_href("a_b-c.d~e/f.html"), "a_b-c.d~e/f.html");
        assert_eq!(encode_href("a b(c).html"), "a%20b%28c%29.html");
    }
}
