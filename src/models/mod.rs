//! Core data models for the match archive.

mod matches;
mod series;

pub use matches::*;
pub use series::*;
