//! Entries file: the CLI's stand-in for an upstream feed.
//!
//! ```toml
//! [[entry]]
//! title = "Some Movie"
//! url = "http://thepiratebay.org/torrent/123/Some_Movie"
//!
//! [entry.metadata]
//! year = 2009
//! genres = ["drama"]
//! ```

use anyhow::{Context, Result};
use feedgate_core::Entry;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct EntriesFile {
    #[serde(default, rename = "entry")]
    entries: Vec<Entry>,
}

pub fn parse_entries(text: &str) -> Result<Vec<Entry>> {
    let file: EntriesFile = toml::from_str(text)?;
    Ok(file.entries)
}

pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read entries: {}", path.display()))?;
    parse_entries(&text).with_context(|| format!("parse entries: {}", path.display()))
}
