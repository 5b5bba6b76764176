//! Typed query methods over the loaded tables.
//!
//! All queries return `wq-core` types so the rest of the workspace never
//! touches SQL.

use crate::error::{LoadError, Result};
use crate::Database;
use wq_core::{JoinedObservation, Observation, Site};
use wq_utils::dates;

impl Database {
    /// All sites in file order.
    pub fn query_sites(&self) -> Result<Vec<Site>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT site_name, latitude, longitude, aquatic_life_use
             FROM sites
             ORDER BY load_order",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Site {
                    site_name: row.get(0)?,
                    latitude: row.get(1)?,
                    longitude: row.get(2)?,
                    aquatic_life_use: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        log::info!("[WQ Debug] query: query_sites returned {} records", rows.len());
        Ok(rows)
    }

    /// Distinct parameter names present in the observations, sorted.
    pub fn query_parameters(&self) -> Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT parameter FROM observations
             WHERE parameter <> ''
             ORDER BY parameter",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        log::info!(
            "[WQ Debug] query: query_parameters returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Site names referenced by observations but missing from the site table.
    pub fn query_unmatched_site_names(&self) -> Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT o.site_name
             FROM observations o
             LEFT JOIN sites s ON o.site_name = s.site_name
             WHERE s.site_name IS NULL
             ORDER BY o.site_name",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Observations left-joined onto site metadata, in file order.
    ///
    /// Observations with no matching site keep `None` enrichment fields.
    pub fn query_joined_observations(&self) -> Result<Vec<JoinedObservation>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT o.id, o.site_name, o.parameter, o.value, o.unit, o.timestamp,
                    s.latitude, s.longitude, s.aquatic_life_use
             FROM observations o
             LEFT JOIN sites s ON o.site_name = s.site_name
             ORDER BY o.id",
        )?;
        let raw_rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, Option<f64>>(6)?,
                    row.get::<_, Option<f64>>(7)?,
                    row.get::<_, Option<String>>(8)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut results = Vec::with_capacity(raw_rows.len());
        for (id, site_name, parameter, value, unit, stored, latitude, longitude, aquatic_life_use) in
            raw_rows
        {
            let timestamp =
                dates::parse_storage(&stored).map_err(|_| LoadError::InvalidTimestamp {
                    row: id as usize,
                    value: stored.clone(),
                })?;
            results.push(JoinedObservation {
                observation: Observation {
                    site_name,
                    parameter,
                    value,
                    unit,
                    timestamp,
                },
                latitude,
                longitude,
                aquatic_life_use,
            });
        }
        log::info!(
            "[WQ Debug] query: query_joined_observations returned {} records",
            results.len()
        );
        Ok(results)
    }
}
