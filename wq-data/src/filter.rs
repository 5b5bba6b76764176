//! Observations matching the current selection.

use crate::selection::Selection;
use wq_core::{JoinedObservation, JoinedTable};

/// The rows of the joined table for one site and parameter.
///
/// Borrowed from the table and tagged with the selection it was built for.
/// Never updated in place: a new selection means a new `FilteredSet`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSet<'a> {
    selection: Selection,
    rows: Vec<&'a JoinedObservation>,
}

/// Recompute the filtered rows for `selection`, preserving table order.
///
/// An unset parameter yields an empty set.
pub fn filtered<'a>(table: &'a JoinedTable, selection: &Selection) -> FilteredSet<'a> {
    let rows = match selection.selected_parameter.as_deref() {
        Some(parameter) => table
            .rows()
            .iter()
            .filter(|row| row.observation.matches(&selection.selected_site, parameter))
            .collect(),
        None => Vec::new(),
    };
    FilteredSet {
        selection: selection.clone(),
        rows,
    }
}

impl<'a> FilteredSet<'a> {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn site_name(&self) -> &str {
        &self.selection.selected_site
    }

    pub fn parameter(&self) -> Option<&str> {
        self.selection.selected_parameter.as_deref()
    }

    pub fn rows(&self) -> &[&'a JoinedObservation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that carry a value; missing values are skipped.
    pub fn with_values(&self) -> impl Iterator<Item = (&'a JoinedObservation, f64)> + '_ {
        self.rows
            .iter()
            .filter_map(|row| row.observation.value.map(|v| (*row, v)))
    }

    /// Distinct units in first-seen order.
    pub fn units(&self) -> Vec<&'a str> {
        let mut units: Vec<&'a str> = Vec::new();
        for row in &self.rows {
            let unit = row.observation.unit.as_str();
            if !units.contains(&unit) {
                units.push(unit);
            }
        }
        units
    }
}
