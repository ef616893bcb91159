//! Pure rule checks: metadata + criteria → decision.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::entry::{Entry, Metadata};
use crate::lookup::LookupError;

use super::criteria::Criteria;

/// Outcome of evaluating one entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Decision {
    pub accepted: bool,
    /// Failed rules, in evaluation order.
    pub reasons: Vec<String>,
    /// The accept rule that overrode `reasons`, if any (e.g. `accept_directors Jane Doe`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_by: Option<String>,
}

impl Decision {
    /// Consolidated rejection message for `name`.
    pub fn summary(&self, name: &str) -> String {
        format!(
            "Skipping {} because of rule(s) {}",
            name,
            self.reasons.join(", ")
        )
    }
}

/// Evaluates `entry` against `criteria`.
///
/// An entry that has not been annotated cannot be judged: it is neither
/// accepted nor rejected, and the missing metadata is returned as an error.
pub fn evaluate(entry: &Entry, criteria: &Criteria) -> Result<Decision, LookupError> {
    match &entry.metadata {
        Some(metadata) => Ok(evaluate_metadata(metadata, criteria)),
        None => Err(LookupError::new(format!("no metadata for {}", entry.title))),
    }
}

/// Runs every configured rule independently against `m`.
pub fn evaluate_metadata(m: &Metadata, c: &Criteria) -> Decision {
    let mut reasons = Vec::new();
    let mut forced_by = None;

    if let (Some(min), Some(score)) = (c.min_score, m.score) {
        if score < min {
            reasons.push(format!("min_score ({} < {})", score, min));
        }
    }
    if let (Some(min), Some(votes)) = (c.min_votes, m.votes) {
        if votes < min {
            reasons.push(format!("min_votes ({} < {})", votes, min));
        }
    }
    if let (Some(min), Some(year)) = (c.min_year, m.year) {
        if year < min {
            reasons.push(format!("min_year ({} < {})", year, min));
        }
    }
    // Year 0 is "unknown" and can never satisfy an upper bound.
    if let (Some(max), Some(year)) = (c.max_year, m.year) {
        if year == 0 || year > max {
            reasons.push(format!("max_year ({} > {})", year, max));
        }
    }

    if let (Some(rejected), Some(genres)) = (&c.reject_genres, &m.genres) {
        if let Some(genre) = first_in(genres, rejected) {
            reasons.push(format!("reject_genres ({})", genre));
        }
    }
    if let (Some(rejected), Some(languages)) = (&c.reject_languages, &m.languages) {
        if let Some(language) = first_in(languages, rejected) {
            reasons.push(format!("reject_languages ({})", language));
        }
    }
    if let (Some(accepted), Some(languages)) = (&c.accept_languages, &m.languages) {
        if let Some(language) = languages.iter().find(|l| !accepted.contains(*l)) {
            reasons.push(format!("accept_languages ({})", language));
        }
    }

    if let (Some(rejected), Some(actors)) = (&c.reject_actors, &m.actors) {
        if let Some(who) = matching_person(actors, rejected) {
            reasons.push(format!("reject_actors {}", who));
        }
    }
    if let (Some(accepted), Some(actors)) = (&c.accept_actors, &m.actors) {
        if let Some(who) = matching_person(actors, accepted) {
            forced_by = Some(format!("accept_actors {}", who));
        }
    }
    if let (Some(rejected), Some(directors)) = (&c.reject_directors, &m.directors) {
        if let Some(who) = matching_person(directors, rejected) {
            reasons.push(format!("reject_directors {}", who));
        }
    }
    if let (Some(accepted), Some(directors)) = (&c.accept_directors, &m.directors) {
        if let Some(who) = matching_person(directors, accepted) {
            forced_by = Some(format!("accept_directors {}", who));
        }
    }

    if let (Some(rejected), Some(rating)) = (&c.reject_mpaa_ratings, &m.mpaa_rating) {
        if rejected.contains(rating) {
            reasons.push(format!("reject_mpaa_ratings {}", rating));
        }
    }
    if let (Some(accepted), Some(rating)) = (&c.accept_mpaa_ratings, &m.mpaa_rating) {
        if !accepted.contains(rating) {
            reasons.push(format!("accept_mpaa_ratings {}", rating));
        }
    }

    Decision {
        accepted: reasons.is_empty() || forced_by.is_some(),
        reasons,
        forced_by,
    }
}

fn first_in<'a>(values: &'a BTreeSet<String>, set: &BTreeSet<String>) -> Option<&'a str> {
    values
        .iter()
        .find(|v| set.contains(*v))
        .map(String::as_str)
}

/// First person whose id or name is listed; reported by name, or id when unnamed.
fn matching_person<'a>(
    people: &'a BTreeMap<String, String>,
    listed: &BTreeSet<String>,
) -> Option<&'a str> {
    people
        .iter()
        .find(|(id, name)| listed.contains(*id) || listed.contains(*name))
        .map(|(id, name)| if name.is_empty() { id.as_str() } else { name.as_str() })
}
