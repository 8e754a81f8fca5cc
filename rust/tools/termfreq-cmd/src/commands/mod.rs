//! Command implementations for termfreq-cmd

use anyhow::{Context, Result};
use termfreq_index::MemoryIndex;

pub mod fields;
pub mod top;

/// Report layout shared by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// Tab-separated rows, suitable for pasting into a spreadsheet
    Tsv,
    /// A single JSON document
    Json,
}

/// Loads an index snapshot from `path`.
pub fn load_index(path: &str) -> Result<MemoryIndex> {
    crate::utils::validate_file_exists(path)?;
    MemoryIndex::load(path).with_context(|| format!("Failed to load index from {path}"))
}
