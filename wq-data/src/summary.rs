//! Descriptive statistics over the filtered observations.

use crate::filter::FilteredSet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use wq_core::Site;
use wq_utils::dates;
use wq_utils::numbers::round2;

pub const NO_DATA_MESSAGE: &str = "No data available for the selected site and parameter.";

/// Statistics for one site and parameter. Numeric fields are rounded to two places.
///
/// Only rows with a value count; `start` and `end` span those rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub site_name: String,
    pub parameter: String,
    pub aquatic_life_use: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub records: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    /// Nothing to summarize: no parameter chosen, no rows, or no values.
    NoData {
        site_name: String,
        parameter: Option<String>,
    },
    Stats(SummaryStats),
}

/// Display strings for one summary table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub site: String,
    pub aquatic_life_use: String,
    pub records: String,
    pub mean: String,
    pub min: String,
    pub max: String,
    pub start_date: String,
    pub end_date: String,
}

impl SummaryRow {
    pub const HEADERS: [&'static str; 8] = [
        "Site",
        "Aquatic Life Use",
        "Records",
        "Mean",
        "Min",
        "Max",
        "Start Date",
        "End Date",
    ];

    pub fn cells(&self) -> [&str; 8] {
        [
            &self.site,
            &self.aquatic_life_use,
            &self.records,
            &self.mean,
            &self.min,
            &self.max,
            &self.start_date,
            &self.end_date,
        ]
    }
}

/// Compute the summary for a filtered set and the selected site's metadata.
pub fn summarize(filtered: &FilteredSet<'_>, site: Option<&Site>) -> Summary {
    let no_data = || Summary::NoData {
        site_name: filtered.site_name().to_string(),
        parameter: filtered.parameter().map(str::to_string),
    };
    let Some(parameter) = filtered.parameter() else {
        return no_data();
    };

    let mut records = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut start: Option<DateTime<Utc>> = None;
    let mut end: Option<DateTime<Utc>> = None;
    for (row, value) in filtered.with_values() {
        let ts = row.observation.timestamp;
        records += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
        start = Some(start.map_or(ts, |s| s.min(ts)));
        end = Some(end.map_or(ts, |e| e.max(ts)));
    }

    let (Some(start), Some(end)) = (start, end) else {
        return no_data();
    };

    Summary::Stats(SummaryStats {
        site_name: filtered.site_name().to_string(),
        parameter: parameter.to_string(),
        aquatic_life_use: site.map(|s| s.aquatic_life_use.clone()),
        latitude: site.and_then(|s| s.latitude),
        longitude: site.and_then(|s| s.longitude),
        records,
        mean: round2(sum / records as f64),
        min: round2(min),
        max: round2(max),
        start,
        end,
    })
}

impl Summary {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Summary::NoData { .. })
    }

    pub fn stats(&self) -> Option<&SummaryStats> {
        match self {
            Summary::Stats(stats) => Some(stats),
            Summary::NoData { .. } => None,
        }
    }

    /// The table row to render, or `None` when the no-data message applies.
    pub fn row(&self) -> Option<SummaryRow> {
        self.stats().map(SummaryStats::row)
    }
}

impl SummaryStats {
    /// Display strings. The mean always shows two decimals; min and max are
    /// observed values and show at most two, without padding zeros.
    pub fn row(&self) -> SummaryRow {
        SummaryRow {
            site: self.site_name.clone(),
            aquatic_life_use: self.aquatic_life_use.clone().unwrap_or_else(|| "Unknown".to_string()),
            records: self.records.to_string(),
            mean: format!("{:.2}", self.mean),
            min: self.min.to_string(),
            max: self.max.to_string(),
            start_date: dates::format_date(&self.start),
            end_date: dates::format_date(&self.end),
        }
    }
}
