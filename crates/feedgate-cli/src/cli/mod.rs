//! CLI for the feedgate entry filter and resolver.

mod commands;
mod entries;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use feedgate_core::config::{self, FeedgateConfig};
use std::path::PathBuf;

use commands::{run_completions, run_filter, run_pipeline, run_resolve, run_search};

/// Top-level CLI for feedgate.
#[derive(Debug, Parser)]
#[command(name = "feedgate")]
#[command(about = "feedgate: filter feed entries by metadata and resolve download links", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/feedgate/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report repeated lookup failures for every entry, not just the first time.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log every rejection instead of once per distinct message.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Evaluate entries from a TOML file against the configured criteria.
    Filter {
        /// Entries file with `[[entry]]` tables.
        path: PathBuf,

        /// Print one JSON object per entry instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Filter entries, then resolve every accepted entry to its download link.
    Run {
        /// Entries file with `[[entry]]` tables.
        path: PathBuf,
    },

    /// Resolve a single listing or search URL.
    Resolve {
        /// Listing page or search URL.
        url: String,

        /// Entry title (used as the query for search URLs).
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the best download link for a title.
    Search {
        /// Title to search for.
        title: String,

        /// Search results page to use instead of the site search.
        #[arg(long)]
        url: Option<String>,
    },

    /// Print shell completions.
    Completions {
        shell: Shell,
    },
}

/// Flags that shape how the filter reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub verbose: bool,
    pub debug: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let CliCommand::Completions { shell } = self.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let opts = ReportOptions {
            verbose: self.verbose,
            debug: self.debug,
        };

        match self.command {
            CliCommand::Filter { path, json } => run_filter(&cfg, opts, &path, json)?,
            CliCommand::Run { path } => run_pipeline(&cfg, opts, &path)?,
            CliCommand::Resolve { url, title } => run_resolve(&cfg, &url, title.as_deref())?,
            CliCommand::Search { title, url } => run_search(&cfg, &title, url.as_deref())?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }

    fn load_config(&self) -> Result<FeedgateConfig> {
        match &self.config {
            Some(path) => config::load_from(path),
            None => config::load_or_init(),
        }
    }
}

#[cfg(test)]
mod tests;
