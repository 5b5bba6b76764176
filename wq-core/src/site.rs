use serde::{Deserialize, Serialize};

/// A fixed monitoring location.
///
/// Coordinates are optional: a site row with blank or non-numeric
/// latitude/longitude still loads, it just cannot be placed on the map.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Unique key; observations reference sites by this name.
    pub site_name: String,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
    /// Regulatory designated-use classification
    pub aquatic_life_use: String,
}

impl Site {
    /// Returns `(latitude, longitude)` when both are present, finite and in range.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude?;
        let lon = self.longitude?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some((lat, lon))
    }
}
