//! `feedgate resolve <url>` – resolve one listing or search reference.
//!
//! Without `--title`, a search URL is resolved using the query it carries.

use anyhow::{Context, Result};
use feedgate_core::config::FeedgateConfig;
use feedgate_core::fetch::PageFetcher;
use feedgate_core::resolver::{PirateBayResolver, ResolverRegistry};
use feedgate_core::{Entry, LogOnce};
use std::sync::Arc;

use super::piratebay;

pub fn run_resolve(cfg: &FeedgateConfig, url: &str, title: Option<&str>) -> Result<()> {
    let resolver = piratebay(cfg, Arc::new(LogOnce::new()))?;
    let title = entry_title(&resolver, url, title);
    tracing::debug!("resolving {} as {:?}", url, title);
    let registry = ResolverRegistry::new().with(resolver);
    let mut entry = Entry::new(title, url);
    let resolver = registry
        .resolve(&mut entry)
        .with_context(|| format!("resolve {url}"))?;
    tracing::info!("{} resolved {} to {}", resolver, url, entry.url);
    println!("{}", entry.url);
    Ok(())
}

/// `--title` if given; for search URLs the query they carry; else the URL itself.
fn entry_title<F: PageFetcher>(
    resolver: &PirateBayResolver<F>,
    url: &str,
    title: Option<&str>,
) -> String {
    title
        .map(str::to_string)
        .or_else(|| resolver.title_from_search_url(url))
        .unwrap_or_else(|| url.to_string())
}
