use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::{PipelineError, Result};

/// Handle to the agency database. Holds only the path; a connection is
/// opened per `with_conn` call and closed when the call returns.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens an existing database, hands the connection to the closure,
    /// and closes it again whether or not the closure succeeded.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        if !self.path.is_file() {
            return Err(PipelineError::MissingDatabase(self.path.clone()));
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        self.open_with(flags, f)
    }

    /// Like `with_conn`, but creates the file when it does not exist yet.
    pub fn with_new_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        self.open_with(OpenFlags::default(), f)
    }

    fn open_with<F, T>(&self, flags: OpenFlags, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        debug!(path = %self.path.display(), "opening database");
        let mut conn = Connection::open_with_flags(&self.path, flags)?;

        let result = f(&mut conn);

        if let Err((_, e)) = conn.close() {
            // A failed close never masks the closure's own error.
            warn!(error = %e, "failed to close database connection");
            if result.is_ok() {
                return Err(PipelineError::Db(e));
            }
        }
        result
    }
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: impl AsRef<Path>) -> Result<()> {
    let schema_path = schema_path.as_ref();
    let schema_sql = fs::read_to_string(schema_path).map_err(|e| PipelineError::Schema {
        path: schema_path.to_path_buf(),
        source: e,
    })?;

    db.with_new_conn(|conn| {
        conn.execute_batch(&schema_sql)?;
        Ok(())
    })?;

    info!(schema = %schema_path.display(), "database initialized");
    Ok(())
}
