//! Filter-then-resolve over a batch of entries.
//!
//! Entries are processed one at a time. Lookup failures skip an entry and
//! resolution failures are recorded against it; neither stops the batch.
//! Resolution failures are reported through the shared [`LogOnce`], so a feed
//! that keeps pointing at the same dead page warns once per process.

use std::sync::Arc;

use crate::entry::Entry;
use crate::filter::{Decision, FilterOutcome, RuleFilter};
use crate::log_once::LogOnce;
use crate::lookup::{LookupError, MetadataLookup};
use crate::resolver::{ResolutionError, ResolverRegistry};

/// An accepted entry whose reference could not be resolved.
#[derive(Debug)]
pub struct ResolutionFailure {
    pub entry: Entry,
    pub error: ResolutionError,
}

#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Admitted entries; resolved in place where a resolver accepted them.
    pub accepted: Vec<Entry>,
    pub rejected: Vec<(Entry, Decision)>,
    pub skipped: Vec<(Entry, LookupError)>,
    pub failed: Vec<ResolutionFailure>,
}

pub struct Pipeline<L> {
    filter: RuleFilter<L>,
    resolvers: ResolverRegistry,
    log_once: Arc<LogOnce>,
}

impl<L: MetadataLookup> Pipeline<L> {
    pub fn new(filter: RuleFilter<L>, resolvers: ResolverRegistry, log_once: Arc<LogOnce>) -> Self {
        Self {
            filter,
            resolvers,
            log_once,
        }
    }

    pub fn run(&self, mut entries: Vec<Entry>) -> PipelineReport {
        let outcomes = self.filter.filter(&mut entries);
        let mut report = PipelineReport::default();

        for (mut entry, outcome) in entries.into_iter().zip(outcomes) {
            match outcome {
                FilterOutcome::Accepted(_) => {
                    if !self.resolvers.is_resolvable(&entry) {
                        report.accepted.push(entry);
                        continue;
                    }
                    match self.resolvers.resolve(&mut entry) {
                        Ok(_) => report.accepted.push(entry),
                        Err(error) => {
                            // The search already reported its no-match once.
                            if !error.is_no_match() {
                                self.log_once
                                    .warn(&format!("failed to resolve {}: {}", entry.title, error));
                            }
                            report.failed.push(ResolutionFailure { entry, error });
                        }
                    }
                }
                FilterOutcome::Rejected(decision) => report.rejected.push((entry, decision)),
                FilterOutcome::Skipped(error) => report.skipped.push((entry, error)),
            }
        }

        tracing::info!(
            "pipeline finished: {} accepted, {} rejected, {} skipped, {} failed",
            report.accepted.len(),
            report.rejected.len(),
            report.skipped.len(),
            report.failed.len()
        );
        report
    }
}
