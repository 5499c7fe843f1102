//! budgetlens: budget summaries and spending analysis over transaction and
//! category snapshots.
//!
//! [`engine`] holds the month-scoped budget aggregation, [`analysis`] the
//! all-time spending analysis. Both are pure; [`dashboard::Dashboard`] keeps
//! loaded data and re-aggregates after every change.

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod format;
pub mod models;
pub mod run;
pub mod source;
