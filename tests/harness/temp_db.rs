use std::path::{Path, PathBuf};
use std::sync::Arc;

use solvewatch::adapter::outbound::sqlite::database::connection::open;
use solvewatch::adapter::outbound::sqlite::SqliteTrackingStore;

/// Temporary SQLite database, deleted on drop.
pub struct TempDb {
    dir: tempfile::TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("solvewatch.db");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open (or reopen) a store over this file.
    pub fn store(&self) -> Arc<SqliteTrackingStore> {
        let pool = open(self.path.to_str().expect("utf-8 temp path")).expect("open sqlite");
        Arc::new(SqliteTrackingStore::new(pool))
    }
}
