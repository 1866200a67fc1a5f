//! Cross-cutting error types for EPPR.
//!
//! Store-level errors (`DatabaseError`) live in `eppr-db`; configuration
//! errors live in `eppr-config`. The CLI converges all of them through
//! `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any EPPR crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A table name outside the known catalogue.
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}
