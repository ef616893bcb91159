//! Resolver and search for thepiratebay.org listing and search pages.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use crate::entry::Entry;
use crate::fetch::PageFetcher;
use crate::log_once::LogOnce;

use super::error::ResolutionError;
use super::ranker::{best, normalize_name, parse_candidates};
use super::{Resolver, Search};

/// References ending in this are already the final resource.
pub const TORRENT_EXTENSION: &str = ".torrent";

/// Site roots (`[piratebay]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PirateBayConfig {
    /// Listing pages and `/search/` live under this root.
    pub base_url: String,
    /// Direct torrent host.
    pub torrents_url: String,
}

impl Default for PirateBayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://thepiratebay.org".to_string(),
            torrents_url: "http://torrents.thepiratebay.org".to_string(),
        }
    }
}

fn with_slash(root: &str) -> String {
    format!("{}/", root.trim_end_matches('/'))
}

pub struct PirateBayResolver<F> {
    fetcher: F,
    base: Url,
    site_prefix: String,
    torrents_prefix: String,
    search_prefix: String,
    log_once: Arc<LogOnce>,
}

impl<F: PageFetcher> PirateBayResolver<F> {
    pub fn new(
        cfg: &PirateBayConfig,
        fetcher: F,
        log_once: Arc<LogOnce>,
    ) -> Result<Self, url::ParseError> {
        let site_prefix = with_slash(&cfg.base_url);
        let base = Url::parse(&site_prefix)?;
        Ok(Self {
            fetcher,
            base,
            search_prefix: format!("{site_prefix}search/"),
            site_prefix,
            torrents_prefix: with_slash(&cfg.torrents_url),
            log_once,
        })
    }

    /// True if `url` is a search-intent reference.
    pub fn is_search_url(&self, url: &str) -> bool {
        url.starts_with(&self.search_prefix)
    }

    /// The query segment of a search URL, percent-decoded.
    ///
    /// `http://thepiratebay.org/search/Foo.Movie/0/7/0` yields `Foo.Movie`.
    pub fn title_from_search_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.search_prefix)?;
        let query = rest.split(['/', '?', '#']).next().filter(|q| !q.is_empty())?;
        urlencoding::decode(query).ok().map(|q| q.into_owned())
    }

    /// Search URL for an already-normalized name.
    pub fn search_url(&self, normalized_name: &str) -> String {
        format!(
            "{}{}",
            self.search_prefix,
            urlencoding::encode(normalized_name)
        )
    }

    /// Fetches a listing page and returns the link inside its `div.download`.
    pub fn parse_download_page(&self, url: &str) -> Result<String, ResolutionError> {
        let html = self
            .fetcher
            .fetch(url)
            .map_err(|e| ResolutionError::transport(url, e))?;

        let document = Html::parse_document(&html);
        let div_selector = Selector::parse("div.download")
            .map_err(|e| ResolutionError::markup(url, e.to_string()))?;
        let a_selector =
            Selector::parse("a").map_err(|e| ResolutionError::markup(url, e.to_string()))?;

        let Some(div) = document.select(&div_selector).next() else {
            return Err(ResolutionError::MissingDownloadLink {
                url: url.to_string(),
            });
        };
        let href = div
            .select(&a_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| ResolutionError::markup(url, "download container has no link"))?;

        Url::parse(url)
            .and_then(|page| page.join(href))
            .map(String::from)
            .map_err(|e| ResolutionError::markup(url, format!("bad download link {href:?}: {e}")))
    }

    /// Best link for `name`, searching `url` if given, else the site search.
    ///
    /// A no-match result is logged once per distinct query.
    pub fn search_title(&self, name: &str, url: Option<&str>) -> Result<String, ResolutionError> {
        let name = normalize_name(name);
        let url = match url {
            Some(u) => u.to_string(),
            None => self.search_url(&name),
        };

        let html = self
            .fetcher
            .fetch(&url)
            .map_err(|e| ResolutionError::transport(&url, e))?;
        let candidates = parse_candidates(&html, &name, &self.base, &url)?;
        tracing::debug!("{} candidate(s) for {:?} at {}", candidates.len(), name, url);

        match best(candidates) {
            Some(winner) => Ok(winner.link),
            None => {
                let err = ResolutionError::NoMatches { query: name };
                self.log_once.warn(&err.to_string());
                Err(err)
            }
        }
    }
}

impl<F: PageFetcher> Resolver for PirateBayResolver<F> {
    fn name(&self) -> &str {
        "piratebay"
    }

    fn resolvable(&self, entry: &Entry) -> bool {
        let url = entry.url.as_str();
        if url.ends_with(TORRENT_EXTENSION) {
            return false;
        }
        url.starts_with(&self.site_prefix) || url.starts_with(&self.torrents_prefix)
    }

    fn resolve(&self, entry: &mut Entry) -> Result<(), ResolutionError> {
        let link = if self.is_search_url(&entry.url) {
            let link = self.search_title(&entry.title, None)?;
            tracing::debug!("search returned {}", link);
            link
        } else {
            self.parse_download_page(&entry.url)?
        };
        entry.url = link;
        Ok(())
    }
}

impl<F: PageFetcher> Search for PirateBayResolver<F> {
    fn search(&self, entry: &Entry) -> Result<String, ResolutionError> {
        self.search_title(&entry.title, None)
    }
}
