pub mod config;
pub mod logging;

pub mod entry;
pub mod fetch;
pub mod filter;
pub mod log_once;
pub mod lookup;
pub mod pipeline;
pub mod resolver;

#[cfg(test)]
mod test_log;

pub use entry::{Entry, Metadata};
pub use log_once::LogOnce;
