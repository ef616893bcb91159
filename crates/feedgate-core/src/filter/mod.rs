//! Rule evaluator: admit or reject entries by their looked-up metadata.
//!
//! Every configured rule is checked independently and each failure adds a
//! reason. Accept rules for people (`accept_actors`, `accept_directors`) never
//! reject on their own; a match overrides every accumulated reason instead.

mod criteria;
mod pass;
mod rules;

pub use criteria::Criteria;
pub use pass::{FilterOutcome, RuleFilter};
pub use rules::{evaluate, evaluate_metadata, Decision};
