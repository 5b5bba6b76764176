//! The in-memory table produced at startup: observations left-joined onto
//! site metadata.

use crate::observation::Observation;
use crate::site::Site;
use serde::Serialize;

/// An observation enriched with its site's metadata.
///
/// The enrichment fields are `None` when no site row matched the
/// observation's `site_name`. That is a data gap, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedObservation {
    #[serde(flatten)]
    pub observation: Observation,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub aquatic_life_use: Option<String>,
}

impl JoinedObservation {
    pub fn has_site_metadata(&self) -> bool {
        self.aquatic_life_use.is_some()
    }
}

/// Read-only dataset shared by every view after load.
///
/// `sites` keeps file order (the first site is the initial selection),
/// `parameters` is the sorted set of distinct parameter names found in the
/// observations, and `rows` keeps observation file order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct JoinedTable {
    sites: Vec<Site>,
    parameters: Vec<String>,
    rows: Vec<JoinedObservation>,
}

impl JoinedTable {
    pub fn new(sites: Vec<Site>, parameters: Vec<String>, rows: Vec<JoinedObservation>) -> Self {
        Self {
            sites,
            parameters,
            rows,
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn rows(&self) -> &[JoinedObservation] {
        &self.rows
    }

    pub fn site(&self, site_name: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.site_name == site_name)
    }

    pub fn has_site(&self, site_name: &str) -> bool {
        self.site(site_name).is_some()
    }

    pub fn has_parameter(&self, parameter: &str) -> bool {
        self.parameters.iter().any(|p| p == parameter)
    }

    /// Site names in load order.
    pub fn site_names(&self) -> Vec<String> {
        self.sites.iter().map(|s| s.site_name.clone()).collect()
    }

    pub fn first_site(&self) -> Option<&Site> {
        self.sites.first()
    }
}
