//! Fixtures shared by the unit tests in this crate.

use crate::selection::Selection;
use wq_core::{JoinedObservation, JoinedTable, Observation, Site};
use wq_utils::dates;

pub fn site(name: &str, latitude: Option<f64>, longitude: Option<f64>) -> Site {
    Site {
        site_name: name.to_string(),
        latitude,
        longitude,
        aquatic_life_use: format!("{} Use", name),
    }
}

/// A joined row for `site`, with coordinates derived from the site name's length.
pub fn obs(site: &str, parameter: &str, value: Option<f64>, unit: &str, date: &str) -> JoinedObservation {
    let offset = site.len() as f64 / 10.0;
    JoinedObservation {
        observation: Observation {
            site_name: site.to_string(),
            parameter: parameter.to_string(),
            value,
            unit: unit.to_string(),
            timestamp: dates::parse_timestamp_utc(date).unwrap(),
        },
        latitude: Some(40.0 + offset),
        longitude: Some(-88.0 - offset),
        aquatic_life_use: Some(format!("{} Use", site)),
    }
}

pub fn selection(site: &str, parameter: Option<&str>) -> Selection {
    Selection {
        selected_site: site.to_string(),
        selected_parameter: parameter.map(str::to_string),
    }
}

/// Build a table whose sites are the distinct row sites in first-seen order.
pub fn table(rows: Vec<JoinedObservation>) -> JoinedTable {
    let mut sites: Vec<Site> = Vec::new();
    for row in &rows {
        if !sites.iter().any(|s| s.site_name == row.observation.site_name) {
            sites.push(site(&row.observation.site_name, row.latitude, row.longitude));
        }
    }
    table_with_sites(sites, rows)
}

pub fn table_with_sites(sites: Vec<Site>, rows: Vec<JoinedObservation>) -> JoinedTable {
    let mut parameters: Vec<String> = rows.iter().map(|r| r.observation.parameter.clone()).collect();
    parameters.sort();
    parameters.dedup();
    JoinedTable::new(sites, parameters, rows)
}
