//! Reactive core of the water quality dashboard.
//!
//! One [`SelectionStore`](selection::SelectionStore) holds the selected site
//! and parameter. Views subscribe to it, and every change re-runs the pure
//! derivations in this crate:
//!
//! - `filter`: rows of the joined table for the current selection
//! - `chart`: ascending time series with title and axis label
//! - `summary`: count, mean, min, max and date range
//! - `map`: site markers, last-sample dates and highlight tracking
//! - `dashboard`: all of the above bundled per selection

pub mod chart;
pub mod dashboard;
pub mod filter;
pub mod map;
pub mod selection;
pub mod summary;

#[cfg(test)]
mod testing;
