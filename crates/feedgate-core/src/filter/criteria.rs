//! Accept/reject constraints for the rule evaluator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// User-specified constraints. Every field is independently optional; an
/// absent field means the rule is not configured.
///
/// Deserialized from the `[criteria]` table of the config file. Unknown keys
/// are rejected so that a misspelled rule does not silently accept everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Criteria {
    pub min_score: Option<f64>,
    pub min_votes: Option<u64>,
    pub min_year: Option<u32>,
    pub max_year: Option<u32>,

    /// Reject if any genre is in this set.
    pub reject_genres: Option<BTreeSet<String>>,
    /// Reject if any language is in this set.
    pub reject_languages: Option<BTreeSet<String>>,
    /// Reject unless every language is in this set.
    pub accept_languages: Option<BTreeSet<String>>,

    /// Person ids or names. A match rejects.
    pub reject_actors: Option<BTreeSet<String>>,
    /// Person ids or names. A match force-accepts; no match is not a rejection.
    pub accept_actors: Option<BTreeSet<String>>,
    pub reject_directors: Option<BTreeSet<String>>,
    pub accept_directors: Option<BTreeSet<String>>,

    pub reject_mpaa_ratings: Option<BTreeSet<String>>,
    /// Reject unless the rating is in this set.
    pub accept_mpaa_ratings: Option<BTreeSet<String>>,
}

impl Criteria {
    /// True when no rule is configured (every entry is accepted).
    pub fn is_empty(&self) -> bool {
        *self == Criteria::default()
    }
}
