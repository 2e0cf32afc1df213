//! Build orchestration.
//!
//! Runs the whole batch in one shot: load the hero table, scan the
//! input tree, parse each record, fold series, render pages, write the
//! output tree. A malformed record skips that one file and an empty
//! series skips that series; everything else keeps going. Only missing
//! configuration inputs abort the run.

use std::path::Path;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::aggregate::aggregate_series;
use crate::config::{ArchiveConfig, ConfigError};
use crate::discovery::{scan_input_root, DiscoveryError, MatchLocator, SeriesFiles};
use crate::heroes::{HeroDirectory, HeroTableError};
use crate::models::ArchiveIndex;
use crate::project::{project_match, project_series};
use crate::record::load_match_summary;
use crate::render::{render_archive_index, render_match_page, render_series_index};
use crate::storage::{write_page, ArchiveLayout, StorageError};

/// Fatal errors that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Hero table error: {0}")]
    Heroes(#[from] HeroTableError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Counters and diagnostics from one build run.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub tournaments: usize,
    pub series_written: usize,
    pub pages_written: usize,
    pub records_skipped: usize,
    pub series_skipped: usize,
    pub errors: Vec<String>,
    pub duration: Duration,
}

/// One-shot archive builder.
pub struct ArchiveBuilder {
    config: ArchiveConfig,
    dry_run: bool,
}

impl ArchiveBuilder {
    pub fn new(config: ArchiveConfig) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    /// Render everything but write nothing.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the full batch.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();
        self.config.validate()?;

        let heroes = match HeroDirectory::from_file(&self.config.hero_table_path) {
            Ok(heroes) => heroes,
            Err(e) => {
                error!(
                    "Cannot load hero table {:?}: {}",
                    self.config.hero_table_path, e
                );
                return Err(e.into());
            }
        };

        let tournaments = scan_input_root(&self.config.input_root)?;
        info!(
            "Building archive: {} tournaments under {:?}",
            tournaments.len(),
            self.config.input_root
        );

        let layout = ArchiveLayout::new(self.config.output_root.clone());
        let mut index = ArchiveIndex::new();
        let mut report = BuildReport {
            tournaments: tournaments.len(),
            ..Default::default()
        };

        for tournament in &tournaments {
            index.ensure_tournament(&tournament.tournament_id);
            for series_files in &tournament.series {
                self.build_series(series_files, &heroes, &layout, &mut index, &mut report)?;
            }
        }

        // The global index is written even when nothing else was, so the
        // entry point always exists.
        let main_html = render_archive_index(&index);
        self.write(&layout.main_index_path(), &main_html)?;

        report.duration = start.elapsed();
        if self.dry_run {
            info!(
                "Dry run complete: {} pages in {} series, nothing written",
                report.pages_written, report.series_written
            );
        } else {
            info!(
                "Main index generated at {:?} ({} pages, {} series, {} skipped records)",
                layout.main_index_path(),
                report.pages_written,
                report.series_written,
                report.records_skipped
            );
        }

        Ok(report)
    }

    fn build_series(
        &self,
        files: &SeriesFiles,
        heroes: &HeroDirectory,
        layout: &ArchiveLayout,
        index: &mut ArchiveIndex,
        report: &mut BuildReport,
    ) -> Result<(), BuildError> {
        let mut games = Vec::new();
        for game_file in &files.games {
            let locator = MatchLocator {
                tournament_id: files.tournament_id.clone(),
                series_key: files.series_key.clone(),
                matchup_body: files.matchup_body.clone(),
                game_number: game_file.game_number,
            };
            match load_match_summary(&game_file.path, &locator) {
                Ok(summary) => games.push(summary),
                Err(e) => {
                    warn!("Skipping {:?}: {}", game_file.path, e);
                    report
                        .errors
                        .push(format!("{}: {}", game_file.path.display(), e));
                    report.records_skipped += 1;
                }
            }
        }

        let series = match aggregate_series(
            &files.tournament_id,
            &files.series_key,
            &files.matchup_body,
            games,
        ) {
            Ok(series) => series,
            Err(e) => {
                info!("Omitting series: {}", e);
                report.series_skipped += 1;
                return Ok(());
            }
        };

        let folder_name = series.folder_name();
        for game in &series.games {
            let page = project_match(game, heroes);
            let html = render_match_page(&page, &self.config.image_base_path);
            let path = layout.game_page_path(&series.tournament_id, &folder_name, &page.file_name);
            self.write(&path, &html)?;
            report.pages_written += 1;
        }

        let series_html = render_series_index(&project_series(&series));
        self.write(
            &layout.series_index_path(&series.tournament_id, &folder_name),
            &series_html,
        )?;
        report.series_written += 1;
        debug!(
            "Generated series {}/{} ({} games)",
            series.tournament_id,
            folder_name,
            series.games.len()
        );

        index.insert_series(&series);
        Ok(())
    }

    fn write(&self, path: &Path, html: &str) -> Result<(), StorageError> {
        if self.dry_run {
            debug!("Dry run, skipping write of {:?}", path);
            return Ok(());
        }
        write_page(path, html)
    }
}
