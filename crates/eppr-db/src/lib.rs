//! # eppr-db
//!
//! libSQL data access for the EPPR progress tracker.
//!
//! - **Schema Manager** ([`EpprDb::provision`]): idempotent creation of every
//!   table and secondary index, parents before children.
//! - **Master-Data Seeder** ([`EpprDb::seed_reference`],
//!   [`EpprDb::seed_dependent`]): idempotent reference rows and natural-key
//!   resolution for dependent rows.
//! - **Table Reader** ([`EpprDb::read_table`]): allow-listed, filtered reads
//!   into a plain tabular value.
//! - **Schema Verifier** ([`EpprDb::verify`]): live tables/columns compared
//!   against an expectation.
//! - Typed repositories for every entity (`repos`).
//!
//! Every operation opens its own [`Session`] and drops it before returning.

pub mod error;
pub mod helpers;
pub mod master_data;
mod provision;
pub mod reader;
pub mod repos;
pub mod schema;
pub mod seed;
pub mod verify;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

use eppr_config::DatabaseConfig;
use error::DatabaseError;
use libsql::Builder;

pub use provision::ProvisionReport;

/// Handle on one EPPR store file.
///
/// Holds only the location. Connections are opened per operation through
/// [`EpprDb::session`].
#[derive(Debug, Clone)]
pub struct EpprDb {
    path: PathBuf,
}

/// A scoped connection to the store with foreign keys enforced.
///
/// Dropping the session closes the connection.
pub struct Session {
    conn: libsql::Connection,
    _db: libsql::Database,
}

impl Session {
    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

impl EpprDb {
    /// Handle for the store at `path`. Nothing is opened or created.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Handle for the store named by the configuration.
    #[must_use]
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.path_buf())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Open a session against an existing store.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotProvisioned` if the store file is absent, or
    /// `DatabaseError::Connection` if it cannot be opened.
    pub async fn session(&self) -> Result<Session, DatabaseError> {
        if !self.exists() {
            return Err(DatabaseError::NotProvisioned(format!(
                "store file {} does not exist",
                self.path.display()
            )));
        }
        self.connect().await
    }

    /// Open (and create, if needed) the store file.
    async fn connect(&self) -> Result<Session, DatabaseError> {
        let db = Builder::new_local(&self.path)
            .build()
            .await
            .map_err(|e| DatabaseError::Connection(format!("{}: {e}", self.path.display())))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("{}: {e}", self.path.display())))?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Connection(format!("PRAGMA foreign_keys: {e}")))?;

        Ok(Session { conn, _db: db })
    }
}
