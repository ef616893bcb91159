//! Resolution error type.

use thiserror::Error;

use crate::fetch::FetchError;

/// Failure while turning an entry reference into a concrete resource URL.
///
/// The entry's reference is never modified when one of these is returned.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Search returned no result whose name matches the query.
    #[error("No matches for {query}")]
    NoMatches { query: String },
    /// The listing page has no download container.
    #[error("Unable to locate download link from url {url}")]
    MissingDownloadLink { url: String },
    /// The page was fetched but could not be interpreted.
    #[error("malformed page at {url}: {message}")]
    Markup { url: String, message: String },
    #[error("unable to fetch {url}")]
    Transport {
        url: String,
        #[source]
        source: FetchError,
    },
    /// No registered resolver handles this reference.
    #[error("no resolver accepts {url}")]
    Unresolvable { url: String },
}

impl ResolutionError {
    pub fn is_no_match(&self) -> bool {
        matches!(self, ResolutionError::NoMatches { .. })
    }

    pub(crate) fn markup(url: &str, message: impl Into<String>) -> Self {
        ResolutionError::Markup {
            url: url.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn transport(url: &str, source: FetchError) -> Self {
        ResolutionError::Transport {
            url: url.to_string(),
            source,
        }
    }
}
