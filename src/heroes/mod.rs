//! Hero dictionary loading and lookup.
//!
//! The hero table maps numeric hero ids to display names and icon file
//! names. Lookups never fail: unknown ids resolve to documented
//! placeholder values so a stale table cannot break page generation.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Namespace prefix on internal hero names.
const INTERNAL_NAME_PREFIX: &str = "npc_dota_hero_";

/// Errors that can occur while loading the hero table.
#[derive(Debug, Error)]
pub enum HeroTableError {
    #[error("Failed to read hero table: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse hero table: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Display metadata for one hero.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroEntry {
    pub id: u32,
    pub display_name: String,

    /// Icon file name, internal name with its prefix stripped plus `.png`
    pub icon_file: String,
}

#[derive(Debug, Deserialize)]
struct RawHero {
    id: Option<u32>,
    name: Option<String>,
    localized_name: Option<String>,
    localized: Option<String>,
}

/// The table arrives either bare or wrapped in a `heroes` object. A
/// wrapper without the key yields an empty table rather than an error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHeroTable {
    Wrapped {
        #[serde(default)]
        heroes: Vec<RawHero>,
    },
    Bare(Vec<RawHero>),
}

/// Immutable hero id lookup, built once per run.
#[derive(Debug, Clone, Default)]
pub struct HeroDirectory {
    heroes: HashMap<u32, HeroEntry>,
}

impl HeroDirectory {
    /// Load the hero table from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, HeroTableError> {
        let contents = std::fs::read_to_string(path)?;
        let directory = Self::from_json(&contents)?;
        info!("Loaded {} heroes from {:?}", directory.len(), path);
        Ok(directory)
    }

    /// Build the table from raw JSON text.
    ///
    /// Entries without an id are dropped. Duplicate ids keep the last
    /// occurrence. The display name is the first non-empty of
    /// `localized_name`, `localized`, then the internal `name`.
    pub fn from_json(json: &str) -> Result<Self, HeroTableError> {
        let raw: RawHeroTable = serde_json::from_str(json)?;
        let list = match raw {
            RawHeroTable::Wrapped { heroes } => heroes,
            RawHeroTable::Bare(heroes) => heroes,
        };

        let mut heroes = HashMap::new();
        for hero in list {
            let Some(id) = hero.id else {
                continue;
            };

            let internal = hero.name.unwrap_or_default();
            let display_name = [hero.localized_name, hero.localized]
                .into_iter()
                .flatten()
                .find(|name| !name.is_empty())
                .unwrap_or_else(|| internal.clone());
            let icon_file = format!("{}.png", internal.replace(INTERNAL_NAME_PREFIX, ""));

            heroes.insert(
                id,
                HeroEntry {
                    id,
                    display_name,
                    icon_file,
                },
            );
        }

        Ok(Self { heroes })
    }

    /// Display name for a hero id, `Unknown (<id>)` when absent.
    pub fn display_name(&self, id: u32) -> String {
        match self.heroes.get(&id) {
            Some(hero) => hero.display_name.clone(),
            None => format!("Unknown ({})", id),
        }
    }

    /// Icon file name for a hero id, empty when absent.
    pub fn icon_file(&self, id: u32) -> &str {
        self.heroes
            .get(&id)
            .map(|hero| hero.icon_file.as_str())
            .unwrap_or("")
    }

    pub fn get(&self, id: u32) -> Option<&HeroEntry> {
        self.heroes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}
