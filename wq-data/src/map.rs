//! Site markers, map bounds and selected-marker tracking.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use wq_core::JoinedTable;
use wq_utils::dates;

/// Tile provider and marker styling passed to the map script as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// Leaflet URL template, e.g. `https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png`
    pub tile_url: String,
    pub attribution: String,
    pub max_zoom: u8,
    /// Zoom used when no marker has usable coordinates.
    pub default_zoom: u8,
    pub marker_color: String,
    pub marker_radius: f64,
    pub selected_color: String,
    pub selected_radius: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            max_zoom: 18,
            default_zoom: 4,
            marker_color: "#1565C0".to_string(),
            marker_radius: 7.0,
            selected_color: "#D84315".to_string(),
            selected_radius: 11.0,
        }
    }
}

/// One clickable marker per distinct site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMarker {
    pub site_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub aquatic_life_use: String,
    /// Most recent observation date across all parameters, `YYYY-MM-DD`.
    pub last_sample: Option<String>,
    /// Popup body, one line per entry. Rendered as text, not HTML.
    pub popup_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl MapBounds {
    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

/// Latest timestamp per site over the whole table, whatever is selected.
pub fn last_sample_dates(table: &JoinedTable) -> HashMap<String, DateTime<Utc>> {
    let mut latest: HashMap<String, DateTime<Utc>> = HashMap::new();
    for row in table.rows() {
        let ts = row.observation.timestamp;
        latest
            .entry(row.observation.site_name.clone())
            .and_modify(|current| {
                if ts > *current {
                    *current = ts;
                }
            })
            .or_insert(ts);
    }
    latest
}

/// Markers for every site with usable coordinates, in site load order.
///
/// Sites are deduplicated by name and coordinates. Sites with missing or
/// out-of-range coordinates are skipped.
pub fn site_markers(table: &JoinedTable) -> Vec<SiteMarker> {
    let last_samples = last_sample_dates(table);
    let mut seen: HashSet<(String, u64, u64)> = HashSet::new();
    let mut markers = Vec::new();
    let mut skipped = 0usize;

    for site in table.sites() {
        let Some((latitude, longitude)) = site.coordinates() else {
            log::warn!("Site {:?} has no usable coordinates; not shown on map", site.site_name);
            skipped += 1;
            continue;
        };
        if !seen.insert((site.site_name.clone(), latitude.to_bits(), longitude.to_bits())) {
            continue;
        }
        let last_sample = last_samples.get(&site.site_name).map(dates::format_date);
        let popup_lines = vec![
            site.site_name.clone(),
            format!("Aquatic Life Use: {}", site.aquatic_life_use),
            format!(
                "Last Sample: {}",
                last_sample.as_deref().unwrap_or("No samples")
            ),
        ];
        markers.push(SiteMarker {
            site_name: site.site_name.clone(),
            latitude,
            longitude,
            aquatic_life_use: site.aquatic_life_use.clone(),
            last_sample,
            popup_lines,
        });
    }
    log::info!(
        "[WQ Debug] map: {} markers, {} sites skipped",
        markers.len(),
        skipped
    );
    markers
}

/// Smallest box containing every marker.
pub fn bounds(markers: &[SiteMarker]) -> Option<MapBounds> {
    let first = markers.first()?;
    let init = MapBounds {
        south: first.latitude,
        west: first.longitude,
        north: first.latitude,
        east: first.longitude,
    };
    Some(markers.iter().fold(init, |b, m| MapBounds {
        south: b.south.min(m.latitude),
        west: b.west.min(m.longitude),
        north: b.north.max(m.latitude),
        east: b.east.max(m.longitude),
    }))
}

/// Restyle instructions for one highlight change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightUpdate {
    /// Marker to return to the normal style.
    pub clear: Option<String>,
    /// Marker to draw as selected.
    pub set: String,
}

/// Tracks the single highlighted marker so changes can be applied
/// incrementally instead of redrawing the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerHighlight {
    current: Option<String>,
}

impl MarkerHighlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Move the highlight to `site`. `None` if it is already highlighted.
    pub fn highlight(&mut self, site: &str) -> Option<HighlightUpdate> {
        if self.current.as_deref() == Some(site) {
            return None;
        }
        let clear = self.current.replace(site.to_string());
        Some(HighlightUpdate {
            clear,
            set: site.to_string(),
        })
    }
}
