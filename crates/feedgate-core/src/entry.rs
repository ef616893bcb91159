//! Feed entries and the metadata attributes a lookup attaches to them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single candidate item flowing through the pipeline.
///
/// `title` and `url` identify the entry. `url` is rewritten in place by a
/// resolver once the concrete resource is known; `metadata` is filled in by a
/// [`MetadataLookup`](crate::lookup::MetadataLookup).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub url: String,
    /// Set by the filter pass for admitted entries.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Entry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            accepted: false,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Name used in diagnostics: the looked-up name when known, else the title.
    pub fn display_name(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.title)
    }
}

/// Attributes annotated onto an entry by the metadata lookup.
///
/// Every field is optional. A rule whose attribute is `None` is skipped.
/// A present `year` of `0` means the lookup could not determine the year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub name: Option<String>,
    pub score: Option<f64>,
    pub votes: Option<u64>,
    pub year: Option<u32>,
    pub genres: Option<BTreeSet<String>>,
    pub languages: Option<BTreeSet<String>>,
    /// Person id → display name.
    pub actors: Option<BTreeMap<String, String>>,
    /// Person id → display name.
    pub directors: Option<BTreeMap<String, String>>,
    pub mpaa_rating: Option<String>,
}
