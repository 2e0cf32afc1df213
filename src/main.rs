use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dota_archive::config::ArchiveConfig;
use dota_archive::discovery::scan_input_root;
use dota_archive::pipeline::ArchiveBuilder;

#[derive(Parser)]
#[command(name = "dota-archive")]
#[command(about = "Static HTML archive generator for Dota 2 match result dumps")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./archive.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full archive from the input tree
    Build {
        /// Input root with tournament subfolders
        #[arg(long)]
        input_root: Option<String>,

        /// Output root for the generated tree
        #[arg(long)]
        output_root: Option<String>,

        /// Hero dictionary JSON file
        #[arg(long)]
        hero_table: Option<String>,

        /// Base path for hero icons inside rendered pages
        #[arg(long)]
        image_base: Option<String>,

        /// Parse and render but don't write
        #[arg(long)]
        dry_run: bool,
    },

    /// List the tournaments, series and games found under the input root
    Scan {
        /// Input root with tournament subfolders
        #[arg(long)]
        input_root: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting dota-archive v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Build {
            input_root,
            output_root,
            hero_table,
            image_base,
            dry_run,
        } => {
            let mut config = config;
            if let Some(input_root) = input_root {
                config.input_root = PathBuf::from(input_root);
            }
            if let Some(output_root) = output_root {
                config.output_root = PathBuf::from(output_root);
            }
            if let Some(hero_table) = hero_table {
                config.hero_table_path = PathBuf::from(hero_table);
            }
            if let Some(image_base) = image_base {
                config.image_base_path = image_base;
            }

            let builder = ArchiveBuilder::new(config).with_dry_run(dry_run);
            match builder.build() {
                Ok(report) => {
                    println!("\n=== Build Results ===");
                    println!("Tournaments:      {}", report.tournaments);
                    println!("Series written:   {}", report.series_written);
                    println!("Pages written:    {}", report.pages_written);
                    println!("Records skipped:  {}", report.records_skipped);
                    println!("Series skipped:   {}", report.series_skipped);
                    println!("Duration:         {:?}", report.duration);
                    if dry_run {
                        println!("\n(dry run - no pages written to disk)");
                    }
                    if !report.errors.is_empty() {
                        println!("\nErrors:");
                        for err in &report.errors {
                            println!("  - {}", err);
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Build failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Scan { input_root } => {
            let root = input_root
                .map(PathBuf::from)
                .unwrap_or(config.input_root);

            match scan_input_root(&root) {
                Ok(tournaments) => {
                    println!("=== Input Scan ({}) ===\n", root.display());
                    if tournaments.is_empty() {
                        println!("No tournaments found.");
                    }
                    for tournament in &tournaments {
                        let games: usize =
                            tournament.series.iter().map(|s| s.games.len()).sum();
                        println!(
                            "{}: {} series, {} games",
                            tournament.tournament_id,
                            tournament.series.len(),
                            games
                        );
                        for series in &tournament.series {
                            let numbers: Vec<String> = series
                                .games
                                .iter()
                                .map(|g| g.game_number.to_string())
                                .collect();
                            println!("  {} (games {})", series.series_key, numbers.join(", "));
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Scan failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Load the config file when present, defaults otherwise.
fn load_config(path: &str) -> Result<ArchiveConfig> {
    let path = PathBuf::from(path);
    if path.exists() {
        tracing::info!("Loading configuration from {:?}", path);
        Ok(ArchiveConfig::from_file(&path)?)
    } else {
        tracing::debug!("No config file at {:?}, using defaults", path);
        Ok(ArchiveConfig::default())
    }
}
