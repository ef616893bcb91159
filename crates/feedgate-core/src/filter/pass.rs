//! Batch filter pass: lookup, evaluate, mark, report.

use std::sync::Arc;

use crate::entry::Entry;
use crate::log_once::LogOnce;
use crate::lookup::{LookupError, MetadataLookup};

use super::criteria::Criteria;
use super::rules::{evaluate, Decision};

/// Result of running one entry through the filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Accepted(Decision),
    Rejected(Decision),
    /// Metadata was unavailable; the entry was neither accepted nor rejected.
    Skipped(LookupError),
}

impl FilterOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FilterOutcome::Accepted(_))
    }

    pub fn decision(&self) -> Option<&Decision> {
        match self {
            FilterOutcome::Accepted(d) | FilterOutcome::Rejected(d) => Some(d),
            FilterOutcome::Skipped(_) => None,
        }
    }
}

/// Applies [`Criteria`] to entries, annotating them through a [`MetadataLookup`] first.
///
/// Lookup failures and rejections are reported through the shared [`LogOnce`]
/// so repeated runs over the same feed do not flood the log. With `verbose`
/// set, repeated lookup failures are still reported per entry; with `debug`
/// set, every rejection is logged.
pub struct RuleFilter<L> {
    criteria: Criteria,
    lookup: L,
    log_once: Arc<LogOnce>,
    verbose: bool,
    debug: bool,
}

impl<L: MetadataLookup> RuleFilter<L> {
    pub fn new(criteria: Criteria, lookup: L, log_once: Arc<LogOnce>) -> Self {
        Self {
            criteria,
            lookup,
            log_once,
            verbose: false,
            debug: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Runs every entry through [`check`](Self::check). Never stops early.
    pub fn filter(&self, entries: &mut [Entry]) -> Vec<FilterOutcome> {
        entries.iter_mut().map(|entry| self.check(entry)).collect()
    }

    /// Looks up, evaluates and marks a single entry.
    pub fn check(&self, entry: &mut Entry) -> FilterOutcome {
        let decision = match self
            .lookup
            .lookup(entry)
            .and_then(|()| evaluate(entry, &self.criteria))
        {
            Ok(decision) => decision,
            Err(e) => {
                let msg = format!("Skipping {} because of an error: {}", entry.title, e);
                if !self.log_once.info(&msg) && self.verbose {
                    tracing::info!("{}", msg);
                }
                return FilterOutcome::Skipped(e);
            }
        };
        if let Some(rule) = &decision.forced_by {
            tracing::debug!("Accepting {} because of {}", entry.title, rule);
        }

        if decision.accepted {
            tracing::debug!("Accepting {}", entry.title);
            entry.accepted = true;
            FilterOutcome::Accepted(decision)
        } else {
            let msg = decision.summary(entry.display_name());
            if self.debug {
                tracing::debug!("{}", msg);
            } else {
                self.log_once.info(&msg);
            }
            FilterOutcome::Rejected(decision)
        }
    }
}
