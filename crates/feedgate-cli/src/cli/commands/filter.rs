//! `feedgate filter <path>` – evaluate entries against the configured criteria.

use anyhow::Result;
use feedgate_core::config::FeedgateConfig;
use feedgate_core::filter::{FilterOutcome, RuleFilter};
use feedgate_core::lookup::StaticLookup;
use feedgate_core::{Entry, LogOnce};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::cli::entries::load_entries;
use crate::cli::ReportOptions;

#[derive(Debug, Serialize)]
struct OutcomeLine<'a> {
    title: &'a str,
    url: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    forced_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn outcome_line<'a>(entry: &'a Entry, outcome: &'a FilterOutcome) -> OutcomeLine<'a> {
    let (label, error) = match outcome {
        FilterOutcome::Accepted(_) => ("accepted", None),
        FilterOutcome::Rejected(_) => ("rejected", None),
        FilterOutcome::Skipped(e) => ("skipped", Some(e.to_string())),
    };
    let decision = outcome.decision();
    OutcomeLine {
        title: &entry.title,
        url: &entry.url,
        outcome: label,
        reasons: decision.map(|d| d.reasons.clone()).unwrap_or_default(),
        forced_by: decision.and_then(|d| d.forced_by.as_deref()),
        error,
    }
}

pub fn run_filter(cfg: &FeedgateConfig, opts: ReportOptions, path: &Path, json: bool) -> Result<()> {
    let mut entries = load_entries(path)?;
    let filter = RuleFilter::new(cfg.criteria.clone(), StaticLookup::new(), Arc::new(LogOnce::new()))
        .verbose(opts.verbose)
        .debug(opts.debug);
    let outcomes = filter.filter(&mut entries);

    for (entry, outcome) in entries.iter().zip(&outcomes) {
        let line = outcome_line(entry, outcome);
        if json {
            println!("{}", serde_json::to_string(&line)?);
            continue;
        }
        match outcome {
            FilterOutcome::Accepted(d) => match &d.forced_by {
                Some(rule) => println!("ACCEPT {} (forced by {})", entry.title, rule),
                None => println!("ACCEPT {}", entry.title),
            },
            FilterOutcome::Rejected(d) => {
                println!("REJECT {}: {}", entry.title, d.reasons.join(", "))
            }
            FilterOutcome::Skipped(e) => println!("SKIP   {}: {}", entry.title, e),
        }
    }
    Ok(())
}
