//! Metadata lookup collaborator.
//!
//! The filter never talks to a metadata service directly; it goes through
//! [`MetadataLookup`], and any failure is treated the same way regardless of
//! its cause.

use std::collections::HashMap;

use thiserror::Error;

use crate::entry::{Entry, Metadata};

/// Metadata annotation failed for an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LookupError {
    pub message: String,
}

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Annotates an entry with metadata in place.
pub trait MetadataLookup {
    fn lookup(&self, entry: &mut Entry) -> Result<(), LookupError>;
}

impl<T: MetadataLookup + ?Sized> MetadataLookup for &T {
    fn lookup(&self, entry: &mut Entry) -> Result<(), LookupError> {
        (**self).lookup(entry)
    }
}

/// In-memory title → metadata table.
///
/// Entries that already carry metadata are left untouched.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    by_title: HashMap<String, Metadata>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: impl Into<String>, metadata: Metadata) {
        self.by_title.insert(title.into(), metadata);
    }

    pub fn with(mut self, title: impl Into<String>, metadata: Metadata) -> Self {
        self.insert(title, metadata);
        self
    }
}

impl MetadataLookup for StaticLookup {
    fn lookup(&self, entry: &mut Entry) -> Result<(), LookupError> {
        if entry.metadata.is_some() {
            return Ok(());
        }
        match self.by_title.get(&entry.title) {
            Some(metadata) => {
                entry.metadata = Some(metadata.clone());
                Ok(())
            }
            None => Err(LookupError::new(format!(
                "no metadata found for {}",
                entry.title
            ))),
        }
    }
}
