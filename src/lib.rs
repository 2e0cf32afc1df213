//! # Dota Archive
//!
//! A static HTML archive generator for Dota 2 match result dumps.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (matches, series, archive index)
//! - **heroes**: Hero dictionary loading and lookup
//! - **discovery**: Input scanning and filename identity resolution
//! - **record**: Raw match JSON parsing and normalization
//! - **aggregate**: Series grouping and winner aggregation
//! - **project**: Page view-model projection
//! - **render**: HTML rendering for game, series and index pages
//! - **storage**: Output tree layout and page writing
//! - **pipeline**: One-shot build orchestration
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod config;
pub mod discovery;
pub mod heroes;
pub mod models;
pub mod pipeline;
pub mod project;
pub mod record;
pub mod render;
pub mod storage;

pub use models::*;
