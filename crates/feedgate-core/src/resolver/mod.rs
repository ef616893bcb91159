//! Resolver interface for turning entry references into concrete resource URLs.
//!
//! The pipeline only depends on the [`Resolver`] trait and dispatches over a
//! [`ResolverRegistry`]; it does not know about any specific site.

mod error;
mod piratebay;
pub mod ranker;

pub use error::ResolutionError;
pub use piratebay::{PirateBayConfig, PirateBayResolver, TORRENT_EXTENSION};

use crate::entry::Entry;

/// Rewrites an entry's reference into a concrete resource URL.
pub trait Resolver {
    fn name(&self) -> &str;

    /// Whether this resolver handles the entry's reference. Looks at the URL only.
    fn resolvable(&self, entry: &Entry) -> bool;

    /// Replaces `entry.url` with the resolved URL. Leaves it untouched on error.
    fn resolve(&self, entry: &mut Entry) -> Result<(), ResolutionError>;
}

/// Looks up the best link for an entry without modifying it.
pub trait Search {
    fn search(&self, entry: &Entry) -> Result<String, ResolutionError>;
}

/// Ordered list of resolvers; the first one that accepts an entry handles it.
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resolver: impl Resolver + 'static) {
        self.resolvers.push(Box::new(resolver));
    }

    pub fn with(mut self, resolver: impl Resolver + 'static) -> Self {
        self.register(resolver);
        self
    }

    fn find(&self, entry: &Entry) -> Option<&dyn Resolver> {
        self.resolvers
            .iter()
            .map(|r| r.as_ref())
            .find(|r| r.resolvable(entry))
    }

    pub fn is_resolvable(&self, entry: &Entry) -> bool {
        self.find(entry).is_some()
    }

    /// Resolves with the first accepting resolver; returns its name.
    pub fn resolve(&self, entry: &mut Entry) -> Result<&str, ResolutionError> {
        let Some(resolver) = self.find(entry) else {
            return Err(ResolutionError::Unresolvable {
                url: entry.url.clone(),
            });
        };
        resolver.resolve(entry)?;
        tracing::debug!("{} resolved {} to {}", resolver.name(), entry.title, entry.url);
        Ok(resolver.name())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fetch::{FetchError, PageFetcher};
    use crate::log_once::LogOnce;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Serves canned pages by exact URL and records every request.
    #[derive(Default)]
    pub(crate) struct StaticPages {
        pages: HashMap<String, String>,
        pub(crate) requested: Rc<RefCell<Vec<String>>>,
    }

    impl StaticPages {
        pub(crate) fn with(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    impl PageFetcher for StaticPages {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Http {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    const LISTING: &str = r#"<html><body><div class="download"><a href="http://torrents.thepiratebay.org/123/Foo_Movie.torrent" title="Get this torrent">Download</a></div></body></html>"#;

    fn search_page() -> String {
        let rows = [
            ("Foo Movie", "/torrent/1/Foo_Movie", 10, 5),
            ("Foo.Movie", "/torrent/2/Foo.Movie", 3, 50),
            ("Foo Movie 2", "/torrent/3/Foo_Movie_2", 999, 999),
        ]
        .iter()
        .map(|(name, href, seed, leech)| {
            format!(
                r#"<tr><td>Video</td><td><div class="detName"><a href="{href}" class="detLink">{name}</a></div></td><td>{seed}</td><td>{leech}</td></tr>"#
            )
        })
        .collect::<String>();
        format!(r#"<html><body><table id="searchResult">{rows}</table></body></html>"#)
    }

    fn resolver(pages: StaticPages) -> (PirateBayResolver<StaticPages>, Arc<LogOnce>) {
        let log = Arc::new(LogOnce::new());
        let r = PirateBayResolver::new(&PirateBayConfig::default(), pages, Arc::clone(&log)).unwrap();
        (r, log)
    }

    #[test]
    fn resolvable_by_url_shape() {
        let (r, _) = resolver(StaticPages::default());
        let check = |url: &str| r.resolvable(&Entry::new("x", url));
        assert!(check("http://thepiratebay.org/torrent/123/Foo"));
        assert!(check("http://thepiratebay.org/search/foo"));
        assert!(check("http://torrents.thepiratebay.org/123/"));
        assert!(!check("http://torrents.thepiratebay.org/123/Foo.torrent"));
        assert!(!check("http://thepiratebay.org/torrent/123/Foo.torrent"));
        assert!(!check("http://example.com/torrent/123"));
        assert!(!check("http://thepiratebay.org.evil.example/x"));
    }

    #[test]
    fn resolve_listing_page_rewrites_url() {
        let url = "http://thepiratebay.org/torrent/123/Foo_Movie";
        let (r, _) = resolver(StaticPages::default().with(url, LISTING));
        let mut entry = Entry::new("Foo Movie", url);
        r.resolve(&mut entry).unwrap();
        assert_eq!(
            entry.url,
            "http://torrents.thepiratebay.org/123/Foo_Movie.torrent"
        );
    }

    #[test]
    fn listing_without_download_container_leaves_entry() {
        let url = "http://thepiratebay.org/torrent/404/Gone";
        let (r, _) = resolver(StaticPages::default().with(url, "<html><body><p>gone</p></body></html>"));
        let mut entry = Entry::new("Gone", url);
        let err = r.resolve(&mut entry).unwrap_err();
        assert!(matches!(err, ResolutionError::MissingDownloadLink { .. }));
        assert!(err.to_string().contains(url));
        assert_eq!(entry.url, url);
    }

    #[test]
    fn listing_with_empty_container_is_markup_error() {
        let url = "http://thepiratebay.org/torrent/5/Empty";
        let (r, _) = resolver(StaticPages::default().with(url, r#"<div class="download"></div>"#));
        let mut entry = Entry::new("Empty", url);
        let err = r.resolve(&mut entry).unwrap_err();
        assert!(matches!(err, ResolutionError::Markup { .. }));
        assert_eq!(entry.url, url);
    }

    #[test]
    fn fetch_failure_is_transport_error() {
        let url = "http://thepiratebay.org/torrent/7/Unreachable";
        let (r, _) = resolver(StaticPages::default());
        let mut entry = Entry::new("Unreachable", url);
        let err = r.resolve(&mut entry).unwrap_err();
        assert!(matches!(err, ResolutionError::Transport { .. }));
        assert!(!err.is_no_match());
        assert_eq!(entry.url, url);
    }

    #[test]
    fn search_url_picks_highest_weight_exact_match() {
        let search = "http://thepiratebay.org/search/foo%20movie";
        let (r, _) = resolver(StaticPages::default().with(search, &search_page()));
        let mut entry = Entry::new("Foo.Movie", "http://thepiratebay.org/search/Foo.Movie");
        r.resolve(&mut entry).unwrap();
        assert_eq!(entry.url, "http://thepiratebay.org/torrent/2/Foo.Movie");
    }

    #[test]
    fn search_does_not_modify_entry() {
        let search = "http://thepiratebay.org/search/foo%20movie";
        let pages = StaticPages::default().with(search, &search_page());
        let (r, _) = resolver(pages);
        let entry = Entry::new("Foo Movie", "http://example.com/feed/1");
        let link = r.search(&entry).unwrap();
        assert_eq!(link, "http://thepiratebay.org/torrent/2/Foo.Movie");
        assert_eq!(entry.url, "http://example.com/feed/1");
    }

    #[test]
    fn search_title_uses_explicit_url() {
        let custom = "http://thepiratebay.org/search/foo/0/7/0";
        let pages = StaticPages::default().with(custom, &search_page());
        let requested = Rc::clone(&pages.requested);
        let (r, _) = resolver(pages);
        let link = r.search_title("Foo Movie", Some(custom)).unwrap();
        assert_eq!(link, "http://thepiratebay.org/torrent/2/Foo.Movie");
        assert_eq!(requested.borrow().as_slice(), &[custom.to_string()]);
    }

    #[test]
    fn no_matches_logged_once() {
        let search = "http://thepiratebay.org/search/bar%20movie";
        let (r, log) = resolver(StaticPages::default().with(search, &search_page()));
        for _ in 0..3 {
            let err = r.search_title("Bar.Movie", None).unwrap_err();
            assert!(err.is_no_match());
            assert_eq!(err.to_string(), "No matches for bar movie");
        }
        assert_eq!(log.len(), 1);
        assert!(log.seen("No matches for bar movie"));
    }

    #[test]
    fn search_no_match_from_resolve_keeps_url() {
        let search = "http://thepiratebay.org/search/bar%20movie";
        let (r, _) = resolver(StaticPages::default().with(search, &search_page()));
        let original = "http://thepiratebay.org/search/Bar.Movie";
        let mut entry = Entry::new("Bar Movie", original);
        let err = r.resolve(&mut entry).unwrap_err();
        assert!(err.is_no_match());
        assert_eq!(entry.url, original);
    }

    #[test]
    fn registry_dispatches_to_first_accepting_resolver() {
        let url = "http://thepiratebay.org/torrent/123/Foo_Movie";
        let (r, _) = resolver(StaticPages::default().with(url, LISTING));
        let registry = ResolverRegistry::new().with(r);

        let mut entry = Entry::new("Foo Movie", url);
        assert!(registry.is_resolvable(&entry));
        assert_eq!(registry.resolve(&mut entry).unwrap(), "piratebay");
        assert!(entry.url.ends_with(TORRENT_EXTENSION));
        assert!(!registry.is_resolvable(&entry));
    }

    #[test]
    fn title_recovered_from_search_url() {
        let (r, _) = resolver(StaticPages::default());
        let title = |url: &str| r.title_from_search_url(url);
        assert_eq!(
            title("http://thepiratebay.org/search/Foo.Movie").as_deref(),
            Some("Foo.Movie")
        );
        assert_eq!(
            title("http://thepiratebay.org/search/foo%20movie/0/7/0").as_deref(),
            Some("foo movie")
        );
        assert_eq!(title("http://thepiratebay.org/search/"), None);
        assert_eq!(title("http://thepiratebay.org/torrent/1/Foo"), None);
    }

    #[test]
    fn registry_without_match_is_unresolvable() {
        let registry = ResolverRegistry::new();
        let mut entry = Entry::new("x", "http://example.com/x");
        let err = registry.resolve(&mut entry).unwrap_err();
        assert!(matches!(err, ResolutionError::Unresolvable { .. }));
    }
}
