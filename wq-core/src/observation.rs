use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single measurement event at a monitoring site.
///
/// `value` is `None` when the source cell was empty or non-numeric; such rows
/// are kept so the table mirrors the input file, but statistics skip them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub site_name: String,
    /// Measured quantity, e.g. "pH" or "Water Temperature".
    pub parameter: String,
    pub value: Option<f64>,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    pub fn matches(&self, site_name: &str, parameter: &str) -> bool {
        self.site_name == site_name && self.parameter == parameter
    }
}
