//! Page fetching.
//!
//! Resolvers depend on [`PageFetcher`] only. [`CurlFetcher`] is the blocking
//! libcurl-backed implementation: one attempt per call, redirects followed,
//! no timeout unless configured.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Transport-level failure while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Http { url: String, status: u32 },
}

/// Fetches a raw document by URL.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// HTTP settings (`[fetch]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds (None = wait indefinitely).
    pub timeout_secs: Option<u64>,
    /// User-Agent header value (None = libcurl default).
    pub user_agent: Option<String>,
}

/// Blocking GET via libcurl.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CurlFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }

    fn perform(&self, url: &str) -> Result<(u32, Vec<u8>), curl::Error> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.timeout {
            easy.timeout(t)?;
        }
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok((code, body))
    }
}

impl PageFetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let (status, body) = self.perform(url).map_err(|source| FetchError::Curl {
            url: url.to_string(),
            source,
        })?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                url: url.to_string(),
                status,
            });
        }
        tracing::debug!("fetched {} ({} bytes)", url, body.len());
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
