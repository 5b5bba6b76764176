//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! Columns are located by header name, so column order is free and extra
//! columns are ignored. A missing required header fails the load.
//!
//! # CSV Formats
//!
//! - **Sites**: `site_name,latitude,longitude,aquatic_life_use`
//! - **Observations**: `site_name,parameter,value,unit,date_time`

use crate::error::{LoadError, Result};
use crate::Database;
use csv::StringRecord;
use rusqlite::{params, OptionalExtension};
use wq_core::JoinedTable;
use wq_utils::dates;

const SITE_COLUMNS: [&str; 4] = ["site_name", "latitude", "longitude", "aquatic_life_use"];
const OBSERVATION_COLUMNS: [&str; 5] = ["site_name", "parameter", "value", "unit", "date_time"];

/// Resolve each required column name to its index in the header row.
fn column_indexes<const N: usize>(
    headers: &StringRecord,
    table: &'static str,
    required: [&'static str; N],
) -> Result<[usize; N]> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_ascii_lowercase())
        .collect();
    let mut indexes = [0usize; N];
    for (slot, column) in indexes.iter_mut().zip(required) {
        *slot = normalized
            .iter()
            .position(|h| h == column)
            .ok_or(LoadError::MissingColumn { table, column })?;
    }
    Ok(indexes)
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

/// Blank, non-numeric and non-finite coordinates are all missing.
fn coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl Database {
    /// Load site metadata from CSV string.
    ///
    /// Blank or non-numeric coordinates are stored as NULL. A repeated site
    /// row identical to an earlier one is ignored; a repeated name with
    /// different metadata is a [`LoadError::ConflictingSite`].
    ///
    /// # Example CSV
    /// ```text
    /// site_name,latitude,longitude,aquatic_life_use
    /// Salt Fork at Homer,40.03,-87.95,General Use
    /// ```
    pub fn load_sites(&self, csv_data: &str) -> Result<usize> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());
        let [name_idx, lat_idx, lon_idx, use_idx] =
            column_indexes(rdr.headers()?, "sites", SITE_COLUMNS)?;

        let mut next_order: i64 =
            conn.query_row("SELECT COUNT(*) FROM sites", [], |row| row.get(0))?;
        let mut count = 0usize;
        let mut skipped = 0usize;
        for result in rdr.records() {
            let r = result?;
            let site_name = field(&r, name_idx);
            if site_name.is_empty() {
                skipped += 1;
                continue;
            }
            let latitude = coordinate(field(&r, lat_idx));
            let longitude = coordinate(field(&r, lon_idx));
            let aquatic_life_use = field(&r, use_idx);

            let existing: Option<(Option<f64>, Option<f64>, String)> = conn
                .query_row(
                    "SELECT latitude, longitude, aquatic_life_use FROM sites WHERE site_name = ?1",
                    params![site_name],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )
                .optional()?;
            if let Some(existing) = existing {
                if existing == (latitude, longitude, aquatic_life_use.to_string()) {
                    skipped += 1;
                    continue;
                }
                return Err(LoadError::ConflictingSite {
                    site_name: site_name.to_string(),
                });
            }

            conn.execute(
                "INSERT INTO sites (site_name, latitude, longitude, aquatic_life_use, load_order)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![site_name, latitude, longitude, aquatic_life_use, next_order],
            )?;
            next_order += 1;
            count += 1;
        }
        log::info!(
            "[WQ Debug] loader: Loaded {} sites, skipped {} blank or duplicate",
            count,
            skipped
        );
        Ok(count)
    }

    /// Load observations from CSV string.
    ///
    /// Every row is kept. Blank or non-numeric `value` cells are stored as
    /// NULL; an unparseable `date_time` fails the whole load.
    ///
    /// # Example CSV
    /// ```text
    /// site_name,parameter,value,unit,date_time
    /// Salt Fork at Homer,pH,7.9,SU,2024-05-14 10:30
    /// Salt Fork at Homer,Dissolved Oxygen,,mg/L,2024-05-14 10:30
    /// ```
    pub fn load_observations(&self, csv_data: &str) -> Result<usize> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());
        let [site_idx, param_idx, value_idx, unit_idx, time_idx] =
            column_indexes(rdr.headers()?, "observations", OBSERVATION_COLUMNS)?;

        let mut count = 0usize;
        let mut missing_values = 0usize;
        for (row, result) in rdr.records().enumerate() {
            let r = result?;
            let raw_time = field(&r, time_idx);
            let timestamp =
                dates::parse_timestamp_utc(raw_time).map_err(|_| LoadError::InvalidTimestamp {
                    row: row + 1,
                    value: raw_time.to_string(),
                })?;
            let value: Option<f64> = field(&r, value_idx).parse().ok().filter(|v: &f64| v.is_finite());
            if value.is_none() {
                missing_values += 1;
            }

            conn.execute(
                "INSERT INTO observations (site_name, parameter, value, unit, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    field(&r, site_idx),
                    field(&r, param_idx),
                    value,
                    field(&r, unit_idx),
                    dates::format_storage(&timestamp),
                ],
            )?;
            count += 1;
        }
        log::info!(
            "[WQ Debug] loader: Loaded {} observations, {} with missing values",
            count,
            missing_values
        );
        Ok(count)
    }

    /// Load both tables and materialise the joined, read-only table.
    ///
    /// Sites load first so duplicate checks run before any observation is
    /// read. Observations whose site has no metadata are kept and logged.
    pub fn load_table(&self, observations_csv: &str, sites_csv: &str) -> Result<JoinedTable> {
        self.load_sites(sites_csv)?;
        if self.query_sites()?.is_empty() {
            return Err(LoadError::NoSites);
        }
        self.load_observations(observations_csv)?;

        let unmatched = self.query_unmatched_site_names()?;
        if !unmatched.is_empty() {
            log::warn!(
                "Observations reference {} site(s) with no metadata: {}",
                unmatched.len(),
                unmatched.join(", ")
            );
        }

        let table = JoinedTable::new(
            self.query_sites()?,
            self.query_parameters()?,
            self.query_joined_observations()?,
        );
        log::info!(
            "[WQ Debug] loader: Joined table ready with {} rows, {} sites, {} parameters",
            table.rows().len(),
            table.sites().len(),
            table.parameters().len()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, LoadError};

    const SITES_CSV: &str = "\
site_name,latitude,longitude,aquatic_life_use
SiteA,40.10,-88.20,Warmwater Habitat
SiteB,41.50,-87.70,Coldwater Habitat
";

    #[test]
    fn load_sites_from_csv() {
        let db = Database::new().unwrap();
        assert_eq!(db.load_sites(SITES_CSV).unwrap(), 2);

        let conn = db.conn.borrow();
        let use_class: String = conn
            .query_row(
                "SELECT aquatic_life_use FROM sites WHERE site_name = 'SiteB'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(use_class, "Coldwater Habitat");
    }

    #[test]
    fn load_sites_accepts_reordered_and_extra_columns() {
        let db = Database::new().unwrap();
        let csv = "\
aquatic_life_use,County,Longitude,Latitude,Site_Name
General Use,Champaign,-88.2,40.1,SiteA
";
        db.load_sites(csv).unwrap();
        let sites = db.query_sites().unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].site_name, "SiteA");
        assert_eq!(sites[0].latitude, Some(40.1));
        assert_eq!(sites[0].longitude, Some(-88.2));
    }

    #[test]
    fn load_sites_missing_column_is_error() {
        let db = Database::new().unwrap();
        let csv = "site_name,latitude,longitude\nSiteA,40.1,-88.2\n";
        match db.load_sites(csv) {
            Err(LoadError::MissingColumn { table, column }) => {
                assert_eq!(table, "sites");
                assert_eq!(column, "aquatic_life_use");
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn load_sites_blank_coordinates_become_null() {
        let db = Database::new().unwrap();
        let csv = "site_name,latitude,longitude,aquatic_life_use\nSiteA,,n/a,General Use\n";
        db.load_sites(csv).unwrap();
        let sites = db.query_sites().unwrap();
        assert_eq!(sites[0].latitude, None);
        assert_eq!(sites[0].longitude, None);
    }

    #[test]
    fn load_sites_collapses_identical_duplicates() {
        let db = Database::new().unwrap();
        let csv = "\
site_name,latitude,longitude,aquatic_life_use
SiteA,40.1,-88.2,General Use
SiteA,40.1,-88.2,General Use
";
        assert_eq!(db.load_sites(csv).unwrap(), 1);
        assert_eq!(db.query_sites().unwrap().len(), 1);
    }

    #[test]
    fn load_sites_collapses_duplicates_with_nan_coordinates() {
        let db = Database::new().unwrap();
        let csv = "\
site_name,latitude,longitude,aquatic_life_use
SiteA,NaN,-88.2,General Use
SiteA,NaN,-88.2,General Use
";
        assert_eq!(db.load_sites(csv).unwrap(), 1);
        let sites = db.query_sites().unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].latitude, None, "NaN is stored as missing");
        assert_eq!(sites[0].longitude, Some(-88.2));
    }

    #[test]
    fn load_sites_conflicting_duplicate_is_error() {
        let db = Database::new().unwrap();
        let csv = "\
site_name,latitude,longitude,aquatic_life_use
SiteA,40.1,-88.2,General Use
SiteA,40.9,-88.2,General Use
";
        match db.load_sites(csv) {
            Err(LoadError::ConflictingSite { site_name }) => assert_eq!(site_name, "SiteA"),
            other => panic!("Expected ConflictingSite, got {:?}", other),
        }
    }

    #[test]
    fn load_observations_from_csv() {
        let db = Database::new().unwrap();
        let csv = "\
site_name,parameter,value,unit,date_time
SiteA,pH,7.1,SU,2024-01-01
SiteA,pH,7.3,SU,2024-01-02 08:15
SiteB,Dissolved Oxygen,8.4,mg/L,2024-01-02T09:00:00-06:00
";
        assert_eq!(db.load_observations(csv).unwrap(), 3);

        let conn = db.conn.borrow();
        let ts: String = conn
            .query_row(
                "SELECT timestamp FROM observations WHERE site_name = 'SiteB'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(ts, "2024-01-02T15:00:00Z", "Offsets should be normalized to UTC");
    }

    #[test]
    fn load_observations_keeps_rows_with_missing_values() {
        let db = Database::new().unwrap();
        let csv = "\
site_name,parameter,value,unit,date_time
SiteA,pH,7.1,SU,2024-01-01
SiteA,pH,,SU,2024-01-02
SiteA,pH,<0.5,SU,2024-01-03
";
        assert_eq!(db.load_observations(csv).unwrap(), 3);

        let conn = db.conn.borrow();
        let nulls: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM observations WHERE value IS NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(nulls, 2, "Blank and non-numeric values should be NULL");
    }

    #[test]
    fn load_observations_bad_timestamp_is_error() {
        let db = Database::new().unwrap();
        let csv = "\
site_name,parameter,value,unit,date_time
SiteA,pH,7.1,SU,2024-01-01
SiteA,pH,7.2,SU,not a date
";
        match db.load_observations(csv) {
            Err(LoadError::InvalidTimestamp { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "not a date");
            }
            other => panic!("Expected InvalidTimestamp, got {:?}", other),
        }
    }

    #[test]
    fn load_observations_missing_column_is_error() {
        let db = Database::new().unwrap();
        let csv = "site_name,parameter,value,date_time\nSiteA,pH,7.1,2024-01-01\n";
        assert!(matches!(
            db.load_observations(csv),
            Err(LoadError::MissingColumn {
                table: "observations",
                column: "unit"
            })
        ));
    }

    #[test]
    fn load_table_requires_sites() {
        let db = Database::new().unwrap();
        let result = db.load_table(
            "site_name,parameter,value,unit,date_time\n",
            "site_name,latitude,longitude,aquatic_life_use\n",
        );
        assert!(matches!(result, Err(LoadError::NoSites)));
    }

    #[test]
    fn load_table_left_joins_unmatched_observations() {
        let db = Database::new().unwrap();
        let observations = "\
site_name,parameter,value,unit,date_time
SiteA,pH,7.1,SU,2024-01-01
Unknown Creek,pH,6.8,SU,2024-01-01
";
        let table = db.load_table(observations, SITES_CSV).unwrap();
        assert_eq!(table.rows().len(), 2, "Every observation row is preserved");

        let matched = &table.rows()[0];
        assert_eq!(matched.aquatic_life_use.as_deref(), Some("Warmwater Habitat"));
        assert_eq!(matched.latitude, Some(40.10));

        let unmatched = &table.rows()[1];
        assert_eq!(unmatched.observation.site_name, "Unknown Creek");
        assert!(unmatched.aquatic_life_use.is_none());
        assert!(unmatched.latitude.is_none());
        assert!(unmatched.longitude.is_none());
    }
}
