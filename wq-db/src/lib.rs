//! In-memory SQLite loading layer for water quality monitoring data.
//!
//! Two CSV tables are read once at startup, observations and site metadata,
//! and left-joined into a read-only [`JoinedTable`] that every dashboard
//! view derives from.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite` (compiles to WASM via `wasm32-unknown-unknown`)
//! - CSV data embedded via `include_str!` in the web app, read from disk by the CLI
//! - The join is done in SQL; the result is materialised once and never mutated
//!
//! # Usage
//!
//! ```rust
//! let table = wq_db::load(
//!     "site_name,parameter,value,unit,date_time\nSiteA,pH,7.1,SU,2024-01-01\n",
//!     "site_name,latitude,longitude,aquatic_life_use\nSiteA,40.1,-88.2,Warmwater Habitat\n",
//! )
//! .unwrap();
//! assert_eq!(table.rows().len(), 1);
//! assert_eq!(table.parameters(), ["pH".to_string()]);
//! ```

pub mod schema;
mod error;
mod loader;
mod queries;

pub use error::{LoadError, Result};

use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use wq_core::JoinedTable;

/// In-memory SQLite database holding the raw observation and site tables.
///
/// Cheaply cloneable (via `Rc`); clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

/// Load both CSV tables and return the joined, read-only table.
pub fn load(observations_csv: &str, sites_csv: &str) -> Result<JoinedTable> {
    let db = Database::new()?;
    db.load_table(observations_csv, sites_csv)
}

/// Read both CSV files from disk and load them. Used by the native CLI.
pub fn load_files(observations_path: &Path, sites_path: &Path) -> Result<JoinedTable> {
    let observations_csv = read_file(observations_path)?;
    let sites_csv = read_file(sites_path)?;
    load(&observations_csv, &sites_csv)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}
