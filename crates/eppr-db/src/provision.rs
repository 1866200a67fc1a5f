//! Schema Manager.
//!
//! Executes the catalogue DDL one statement at a time so a failure names the
//! table or index it came from. Every statement uses `IF NOT EXISTS`, so
//! re-running is safe and a partially provisioned store is completed by the
//! next run.

use serde::Serialize;
use tracing::{debug, info};

use crate::EpprDb;
use crate::error::DatabaseError;
use crate::schema::{INDEXES, TABLES};

/// What a provisioning run ensured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub path: String,
    pub tables: Vec<&'static str>,
    pub indexes: Vec<&'static str>,
}

impl EpprDb {
    /// Create the store (and its parent directory), then every table and
    /// secondary index that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Io` if the parent directory cannot be created,
    /// `DatabaseError::Connection` if the store cannot be opened, and
    /// `DatabaseError::Provision` naming the first statement that failed.
    pub async fn provision(&self) -> Result<ProvisionReport, DatabaseError> {
        if let Some(parent) = self.path().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let session = self.connect().await?;
        let conn = session.conn();

        let mut report = ProvisionReport {
            path: self.path().display().to_string(),
            tables: Vec::with_capacity(TABLES.len()),
            indexes: Vec::with_capacity(INDEXES.len()),
        };

        for def in TABLES {
            debug!(table = def.name(), "ensuring table");
            conn.execute(def.ddl, ())
                .await
                .map_err(|e| DatabaseError::Provision {
                    object: format!("table {}", def.name()),
                    message: e.to_string(),
                })?;
            report.tables.push(def.name());
        }

        for index in INDEXES {
            debug!(index = index.name, table = index.table.as_str(), "ensuring index");
            conn.execute(index.ddl, ())
                .await
                .map_err(|e| DatabaseError::Provision {
                    object: format!("index {}", index.name),
                    message: e.to_string(),
                })?;
            report.indexes.push(index.name);
        }

        info!(
            path = %report.path,
            tables = report.tables.len(),
            indexes = report.indexes.len(),
            "store provisioned"
        );
        Ok(report)
    }
}
