//! CLI command handlers, one file per command.

mod completions;
mod filter;
mod resolve;
mod run;
mod search;

pub use completions::run_completions;
pub use filter::run_filter;
pub use resolve::run_resolve;
pub use run::run_pipeline;
pub use search::run_search;

use anyhow::{Context, Result};
use feedgate_core::config::FeedgateConfig;
use feedgate_core::fetch::CurlFetcher;
use feedgate_core::resolver::PirateBayResolver;
use feedgate_core::LogOnce;
use std::sync::Arc;

fn piratebay(cfg: &FeedgateConfig, log_once: Arc<LogOnce>) -> Result<PirateBayResolver<CurlFetcher>> {
    let fetcher = CurlFetcher::from_config(&cfg.fetch);
    PirateBayResolver::new(&cfg.piratebay, fetcher, log_once)
        .with_context(|| format!("invalid piratebay base_url {:?}", cfg.piratebay.base_url))
}
