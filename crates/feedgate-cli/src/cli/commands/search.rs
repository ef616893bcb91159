//! `feedgate search <title>` – print the best download link for a title.

use anyhow::{Context, Result};
use feedgate_core::config::FeedgateConfig;
use feedgate_core::LogOnce;
use std::sync::Arc;

use super::piratebay;

pub fn run_search(cfg: &FeedgateConfig, title: &str, url: Option<&str>) -> Result<()> {
    let resolver = piratebay(cfg, Arc::new(LogOnce::new()))?;
    let link = resolver
        .search_title(title, url)
        .with_context(|| format!("search {title:?}"))?;
    println!("{}", link);
    Ok(())
}
