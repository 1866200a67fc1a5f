//! Typed repositories for the EPPR entities.
//!
//! Each module adds methods to `EpprDb` via `impl EpprDb` blocks. Every call
//! opens its own session; inserts return the store-generated surrogate id.

pub mod deliverable;
pub mod master;
pub mod project;
pub mod user;
pub mod work;

use eppr_core::enums::TableName;
use libsql::params::IntoParams;

use crate::EpprDb;
use crate::error::DatabaseError;

impl EpprDb {
    /// Run one INSERT and return the new row's id.
    pub(crate) async fn insert_row(
        &self,
        table: TableName,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<i64, DatabaseError> {
        let session = self.session().await?;
        session
            .conn()
            .execute(sql, params)
            .await
            .map_err(|e| DatabaseError::on_table(table.as_str(), "insert", &e))?;
        Ok(session.conn().last_insert_rowid())
    }

    /// Run one SELECT and map every row.
    pub(crate) async fn select_rows<T>(
        &self,
        table: TableName,
        sql: &str,
        params: impl IntoParams,
        map: fn(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Vec<T>, DatabaseError> {
        let session = self.session().await?;
        let mut rows = session
            .conn()
            .query(sql, params)
            .await
            .map_err(|e| DatabaseError::on_table(table.as_str(), "select", &e))?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(map(&row)?);
        }
        Ok(results)
    }

    /// Run one SELECT and map the first row, if any.
    pub(crate) async fn select_one<T>(
        &self,
        table: TableName,
        sql: &str,
        params: impl IntoParams,
        map: fn(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Option<T>, DatabaseError> {
        let session = self.session().await?;
        let mut rows = session
            .conn()
            .query(sql, params)
            .await
            .map_err(|e| DatabaseError::on_table(table.as_str(), "select", &e))?;
        match rows.next().await? {
            Some(row) => Ok(Some(map(&row)?)),
            None => Ok(None),
        }
    }
}
