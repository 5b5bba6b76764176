//! Time series for the line chart.

use crate::filter::FilteredSet;
use serde::Serialize;
use wq_utils::dates;

/// A single (timestamp, value) pair used for line chart data points.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    /// UTC, `YYYY-MM-DDTHH:MM:SSZ`
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSeries {
    pub site_name: String,
    pub parameter: String,
    pub title: String,
    /// Unit of the first filtered row.
    pub unit: String,
    pub y_axis_label: String,
    /// More than one unit appears in the filtered rows. The label still
    /// shows the first row's unit; no conversion is attempted.
    pub mixed_units: bool,
    /// Ascending by timestamp.
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartView {
    /// Blank chart area.
    Empty,
    Series(ChartSeries),
}

impl ChartView {
    pub fn is_empty(&self) -> bool {
        matches!(self, ChartView::Empty)
    }

    pub fn series(&self) -> Option<&ChartSeries> {
        match self {
            ChartView::Series(series) => Some(series),
            ChartView::Empty => None,
        }
    }
}

/// Build the chart for a filtered set. Rows without a value are not plotted.
pub fn chart_view(filtered: &FilteredSet<'_>) -> ChartView {
    let (Some(parameter), Some(first)) = (filtered.parameter(), filtered.rows().first()) else {
        return ChartView::Empty;
    };

    let mut rows: Vec<_> = filtered.with_values().collect();
    if rows.is_empty() {
        return ChartView::Empty;
    }
    rows.sort_by_key(|(row, _)| row.observation.timestamp);

    let unit = first.observation.unit.clone();
    let units = filtered.units();
    let mixed_units = units.len() > 1;
    if mixed_units {
        log::warn!(
            "Mixed units for {} at {}: {}; labelling with {:?}",
            parameter,
            filtered.site_name(),
            units.join(", "),
            unit
        );
    }

    let y_axis_label = if unit.is_empty() {
        parameter.to_string()
    } else {
        format!("{} ({})", parameter, unit)
    };

    ChartView::Series(ChartSeries {
        site_name: filtered.site_name().to_string(),
        parameter: parameter.to_string(),
        title: format!("{} at {}", parameter, filtered.site_name()),
        unit,
        y_axis_label,
        mixed_units,
        points: rows
            .into_iter()
            .map(|(row, value)| ChartPoint {
                date: dates::format_storage(&row.observation.timestamp),
                value,
            })
            .collect(),
    })
}
