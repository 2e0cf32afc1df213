//! Output tree layout and page writing.
//!
//! The archive is a static tree under the output root:
//! - `matches/<tournament>/<series folder>/` holds game pages plus the
//!   series index
//! - `main/index.html` is the global entry point
//!
//! Every run regenerates pages in place; existing files are overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur during archive writes.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output path layout rooted at the configured output directory.
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    pub output_root: PathBuf,
}

impl ArchiveLayout {
    pub fn new(output_root: PathBuf) -> Self {
        Self { output_root }
    }

    pub fn matches_dir(&self) -> PathBuf {
        self.output_root.join("matches")
    }

    pub fn main_dir(&self) -> PathBuf {
        self.output_root.join("main")
    }

    pub fn main_index_path(&self) -> PathBuf {
        self.main_dir().join("index.html")
    }

    pub fn series_dir(&self, tournament_id: &str, folder_name: &str) -> PathBuf {
        self.matches_dir().join(tournament_id).join(folder_name)
    }

    pub fn series_index_path(&self, tournament_id: &str, folder_name: &str) -> PathBuf {
        self.series_dir(tournament_id, folder_name).join("index.html")
    }

    pub fn game_page_path(
        &self,
        tournament_id: &str,
        folder_name: &str,
        file_name: &str,
    ) -> PathBuf {
        self.series_dir(tournament_id, folder_name).join(file_name)
    }
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

/// Write one page, creating parent directories as needed.
pub fn write_page(path: &Path, html: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    debug!("Wrote {:?}", path);
    Ok(())
}
