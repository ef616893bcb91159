//! `feedgate run <path>` – filter entries, then resolve the accepted ones.

use anyhow::Result;
use feedgate_core::config::FeedgateConfig;
use feedgate_core::filter::RuleFilter;
use feedgate_core::lookup::StaticLookup;
use feedgate_core::pipeline::Pipeline;
use feedgate_core::resolver::ResolverRegistry;
use feedgate_core::LogOnce;
use std::path::Path;
use std::sync::Arc;

use super::piratebay;
use crate::cli::entries::load_entries;
use crate::cli::ReportOptions;

pub fn run_pipeline(cfg: &FeedgateConfig, opts: ReportOptions, path: &Path) -> Result<()> {
    let entries = load_entries(path)?;
    let log_once = Arc::new(LogOnce::new());

    let filter = RuleFilter::new(cfg.criteria.clone(), StaticLookup::new(), Arc::clone(&log_once))
        .verbose(opts.verbose)
        .debug(opts.debug);
    let resolvers = ResolverRegistry::new().with(piratebay(cfg, Arc::clone(&log_once))?);
    let report = Pipeline::new(filter, resolvers, log_once).run(entries);

    for entry in &report.accepted {
        println!("{}\t{}", entry.title, entry.url);
    }
    for failure in &report.failed {
        eprintln!("failed: {}: {}", failure.entry.title, error_chain(&failure.error));
    }
    println!(
        "{} accepted, {} rejected, {} skipped, {} failed",
        report.accepted.len(),
        report.rejected.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(())
}

/// `err: cause: cause` on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
