//! Table Reader.
//!
//! Reads a whole table (optionally filtered) into a [`TableData`]: column
//! names in declaration order and rows in store order. The table name is
//! resolved through the catalogue and filter values are bound as
//! parameters, so no caller text ends up in the SQL.

use eppr_core::enums::TableName;
use serde::Serialize;
use tracing::debug;

use crate::EpprDb;
use crate::error::DatabaseError;
use crate::helpers::quote_ident;
use crate::schema::table_def;

/// A single cell as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<libsql::Value> for Cell {
    fn from(value: libsql::Value) -> Self {
        match value {
            libsql::Value::Null => Self::Null,
            libsql::Value::Integer(v) => Self::Integer(v),
            libsql::Value::Real(v) => Self::Real(v),
            libsql::Value::Text(v) => Self::Text(v),
            libsql::Value::Blob(v) => Self::Blob(v),
        }
    }
}

impl From<Cell> for libsql::Value {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Null => Self::Null,
            Cell::Integer(v) => Self::Integer(v),
            Cell::Real(v) => Self::Real(v),
            Cell::Text(v) => Self::Text(v),
            Cell::Blob(v) => Self::Blob(v),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

/// Equality conditions (AND-ed) and an optional row limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    pub conditions: Vec<(String, Cell)>,
    pub limit: Option<u32>,
}

impl RowFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `column = value` condition.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Rows of one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableData {
    pub table: TableName,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Position of `column` in [`Self::columns`].
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Value of `column` in row `row`.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }
}

impl EpprDb {
    /// Read all rows of `table` matching `filter`.
    ///
    /// Returns `Ok(None)` when the store file does not exist, before the table
    /// name or filter is looked at. The file is never created by a read.
    ///
    /// # Errors
    ///
    /// - `DatabaseError::UnknownTable` for a name outside the catalogue
    /// - `DatabaseError::UnknownColumn` for a filter column the table does not declare
    /// - `DatabaseError::NotProvisioned` when the store exists but the table does not
    /// - `DatabaseError::Query` / `Connection` for other store failures
    pub async fn read_table(
        &self,
        table: &str,
        filter: Option<&RowFilter>,
    ) -> Result<Option<TableData>, DatabaseError> {
        if !self.exists() {
            debug!(path = %self.path().display(), table, "store absent, nothing to read");
            return Ok(None);
        }

        let table = TableName::from_name(table)
            .ok_or_else(|| DatabaseError::UnknownTable(table.to_string()))?;
        let def = table_def(table);

        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Some(filter) = filter {
            for (column, value) in &filter.conditions {
                if !def.has_column(column) {
                    return Err(DatabaseError::UnknownColumn {
                        table: table.as_str().to_string(),
                        column: column.clone(),
                    });
                }
                params.push(value.clone().into());
                conditions.push(format!("{} = ?{}", quote_ident(column), params.len()));
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let limit_clause = filter
            .and_then(|f| f.limit)
            .map_or_else(String::new, |limit| format!(" LIMIT {limit}"));
        let sql = format!(
            "SELECT * FROM {}{where_clause}{limit_clause}",
            quote_ident(table.as_str())
        );

        let session = self.session().await?;
        let mut rows = session
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await
            .map_err(|e| DatabaseError::on_table(table.as_str(), "read", &e))?;

        let column_count = rows.column_count();
        let columns = (0..column_count)
            .map(|idx| rows.column_name(idx).unwrap_or_default().to_string())
            .collect::<Vec<_>>();

        let mut data = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::on_table(table.as_str(), "read", &e))?
        {
            let mut cells = Vec::with_capacity(columns.len());
            for idx in 0..column_count {
                cells.push(Cell::from(row.get_value(idx)?));
            }
            data.push(cells);
        }

        debug!(table = table.as_str(), rows = data.len(), "table read");
        Ok(Some(TableData {
            table,
            columns,
            rows: data,
        }))
    }
}
