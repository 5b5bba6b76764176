//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// - `sites` - Site metadata keyed by name. `load_order` preserves file order
///   so the first listed site can seed the initial selection.
/// - `observations` - One row per measurement. `id` preserves file order.
///   `value` is NULL when the source cell was blank or non-numeric, and
///   `timestamp` is UTC text in `YYYY-MM-DDTHH:MM:SSZ` form so `MAX()` and
///   `ORDER BY` behave chronologically.
///
/// There is no foreign key from observations to sites: the join is a LEFT
/// JOIN and unmatched observations are kept.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS sites (
        site_name TEXT PRIMARY KEY,
        latitude REAL,
        longitude REAL,
        aquatic_life_use TEXT NOT NULL,
        load_order INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS observations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        site_name TEXT NOT NULL,
        parameter TEXT NOT NULL,
        value REAL,
        unit TEXT NOT NULL,
        timestamp TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_obs_site ON observations(site_name);
    CREATE INDEX IF NOT EXISTS idx_obs_parameter ON observations(parameter);
    "#
}
