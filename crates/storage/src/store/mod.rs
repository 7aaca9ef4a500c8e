#![forbid(unsafe_code)]

mod agencies;
mod complaints;
mod error;
mod stats;
mod support;
mod types;
mod users;

pub use complaints::{MAP_LOCATION_LIMIT, TOP_LIKED_LIMIT};
pub use error::StoreError;
pub use types::*;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE_NAME: &str = "civic_petitions.db";

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        support::migrate_sqlite_schema(&conn)?;

        tracing::debug!(path = %db_path.display(), "complaint store opened");
        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}
