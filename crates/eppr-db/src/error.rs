//! Database error types for eppr-db.

use serde::Serialize;
use thiserror::Error;

/// Errors from store operations.
///
/// Schema mismatches are not errors: the verifier reports them as data in a
/// [`crate::verify::VerificationReport`].
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The store could not be opened or a session could not be set up.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A UNIQUE or FOREIGN KEY constraint rejected a write.
    #[error("Constraint violation on '{table}': {message}")]
    ConstraintViolation { table: String, message: String },

    /// The store file, or a table in it, does not exist yet.
    #[error("Not provisioned: {0}")]
    NotProvisioned(String),

    /// A table name outside the schema catalogue.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// A column that the table does not declare.
    #[error("Unknown column '{column}' for table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// A schema statement failed during provisioning.
    #[error("Provisioning failed at {object}: {message}")]
    Provision { object: String, message: String },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Filesystem error while preparing the store location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`DatabaseError`] for callers that only care
/// about the failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Connection,
    ConstraintViolation,
    NotProvisioned,
    Query,
}

impl DatabaseError {
    /// The failure family this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) | Self::Io(_) => ErrorKind::Connection,
            Self::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            Self::NotProvisioned(_) => ErrorKind::NotProvisioned,
            Self::UnknownTable(_)
            | Self::UnknownColumn { .. }
            | Self::Provision { .. }
            | Self::Query(_)
            | Self::LibSql(_) => ErrorKind::Query,
        }
    }

    /// Attach table context to a raw libSQL error.
    ///
    /// Constraint failures become `ConstraintViolation`, a missing table
    /// becomes `NotProvisioned`, everything else is a `Query` error naming the
    /// table and the operation.
    pub(crate) fn on_table(table: &str, op: &str, err: &libsql::Error) -> Self {
        let message = err.to_string();
        if message.contains("constraint failed") {
            Self::ConstraintViolation {
                table: table.to_string(),
                message,
            }
        } else if message.contains("no such table") {
            Self::NotProvisioned(format!("table '{table}' does not exist"))
        } else {
            Self::Query(format!("{op} on '{table}': {message}"))
        }
    }
}
