//! Stats module - per-date roll-ups and headline totals

mod aggregator;
mod summary;

pub use aggregator::{Aggregator, DateColumn};
pub use summary::{GlobalSummary, GlobalTotals, Summary, Totals};
