//! Schema Verifier.
//!
//! Compares the live tables and columns of a store against an
//! [`ExpectedSchema`]. Mismatches are reported as [`Discrepancy`] values;
//! only failing to open or query the store is an error.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::EpprDb;
use crate::error::DatabaseError;
use crate::schema::TABLES;

/// Table name to column names. Column order is not significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedSchema {
    tables: BTreeMap<String, BTreeSet<String>>,
}

impl ExpectedSchema {
    /// An empty expectation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The expectation for stores built by [`EpprDb::provision`].
    #[must_use]
    pub fn current() -> Self {
        TABLES.iter().fold(Self::new(), |schema, def| {
            schema.table(def.name(), def.columns.iter().copied())
        })
    }

    /// Expect `name` with exactly `columns`.
    #[must_use]
    pub fn table<I, S>(mut self, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert(name.into(), columns.into_iter().map(Into::into).collect());
        self
    }

    /// Drop `name` from the expectation.
    #[must_use]
    pub fn without_table(mut self, name: &str) -> Self {
        self.tables.remove(name);
        self
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    #[must_use]
    pub fn columns(&self, table: &str) -> Option<&BTreeSet<String>> {
        self.tables.get(table)
    }
}

/// One difference between the live store and the expectation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    MissingTable { table: String },
    UnexpectedTable { table: String },
    MissingColumn { table: String, column: String },
    UnexpectedColumn { table: String, column: String },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTable { table } => write!(f, "missing table '{table}'"),
            Self::UnexpectedTable { table } => write!(f, "unexpected table '{table}'"),
            Self::MissingColumn { table, column } => {
                write!(f, "missing column '{table}.{column}'")
            }
            Self::UnexpectedColumn { table, column } => {
                write!(f, "unexpected column '{table}.{column}'")
            }
        }
    }
}

/// Outcome of comparing a provisioned store with an expectation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub tables_checked: usize,
    pub discrepancies: Vec<Discrepancy>,
}

impl VerificationReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verification {
    /// The store file does not exist.
    NotProvisioned { path: String },
    Checked(VerificationReport),
}

impl Verification {
    /// True only for a checked store with no discrepancies.
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, Self::Checked(report) if report.passed())
    }
}

/// Internal tables maintained by the engine itself.
fn is_internal(table: &str) -> bool {
    table.starts_with("sqlite_") || table.starts_with("libsql_")
}

impl EpprDb {
    /// Compare the live schema with `expected`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only if the store cannot be opened or its
    /// catalogue cannot be queried.
    pub async fn verify(&self, expected: &ExpectedSchema) -> Result<Verification, DatabaseError> {
        if !self.exists() {
            return Ok(Verification::NotProvisioned {
                path: self.path().display().to_string(),
            });
        }

        let session = self.session().await?;
        let conn = session.conn();

        let mut actual_tables = BTreeSet::new();
        let mut rows = conn
            .query("SELECT name FROM sqlite_master WHERE type = 'table'", ())
            .await?;
        while let Some(row) = rows.next().await? {
            let name = row.get::<String>(0)?;
            if !is_internal(&name) {
                actual_tables.insert(name);
            }
        }

        let mut report = VerificationReport::default();

        for table in expected.table_names() {
            if !actual_tables.contains(table) {
                report.discrepancies.push(Discrepancy::MissingTable {
                    table: table.to_string(),
                });
            }
        }
        for table in &actual_tables {
            if expected.columns(table).is_none() {
                report.discrepancies.push(Discrepancy::UnexpectedTable {
                    table: table.clone(),
                });
            }
        }

        for table in &actual_tables {
            let Some(expected_columns) = expected.columns(table) else {
                continue;
            };

            let mut actual_columns = BTreeSet::new();
            let mut rows = conn
                .query("SELECT name FROM pragma_table_info(?1)", [table.as_str()])
                .await?;
            while let Some(row) = rows.next().await? {
                actual_columns.insert(row.get::<String>(0)?);
            }
            debug!(table = %table, columns = actual_columns.len(), "columns read");

            for column in expected_columns.difference(&actual_columns) {
                report.discrepancies.push(Discrepancy::MissingColumn {
                    table: table.clone(),
                    column: column.clone(),
                });
            }
            for column in actual_columns.difference(expected_columns) {
                report.discrepancies.push(Discrepancy::UnexpectedColumn {
                    table: table.clone(),
                    column: column.clone(),
                });
            }
            report.tables_checked += 1;
        }

        info!(
            tables_checked = report.tables_checked,
            discrepancies = report.discrepancies.len(),
            "schema verified"
        );
        Ok(Verification::Checked(report))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{provisioned_store, temp_store};

    fn checked(verification: Verification) -> VerificationReport {
        match verification {
            Verification::Checked(report) => report,
            Verification::NotProvisioned { path } => panic!("store {path} not provisioned"),
        }
    }

    #[tokio::test]
    async fn fresh_store_matches_current_schema() {
        let (_dir, db) = provisioned_store().await;
        let report = checked(db.verify(&ExpectedSchema::current()).await.unwrap());
        assert!(report.passed(), "{:?}", report.discrepancies);
        assert_eq!(report.tables_checked, TABLES.len());
    }

    #[tokio::test]
    async fn missing_store_is_not_provisioned() {
        let (_dir, db) = temp_store();
        let verification = db.verify(&ExpectedSchema::current()).await.unwrap();
        assert!(matches!(verification, Verification::NotProvisioned { .. }));
        assert!(!verification.passed());
        assert!(!db.exists());
    }

    #[tokio::test]
    async fn dropped_column_is_the_only_discrepancy() {
        let (_dir, db) = temp_store();
        std::fs::create_dir_all(db.path().parent().unwrap()).unwrap();
        db.connect()
            .await
            .unwrap()
            .conn()
            .execute(
                "CREATE TABLE project (
                    proj_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    proj_code TEXT NOT NULL,
                    proj_name TEXT NOT NULL,
                    proj_start_dt DATE,
                    proj_finish_dt DATE
                )",
                (),
            )
            .await
            .unwrap();

        let expected = ExpectedSchema::new().table(
            "project",
            [
                "proj_id",
                "proj_code",
                "proj_name",
                "proj_status",
                "proj_start_dt",
                "proj_finish_dt",
            ],
        );
        let report = checked(db.verify(&expected).await.unwrap());
        assert_eq!(
            report.discrepancies,
            vec![Discrepancy::MissingColumn {
                table: "project".into(),
                column: "proj_status".into(),
            }]
        );
    }

    #[tokio::test]
    async fn extra_table_and_column_are_reported() {
        let (_dir, db) = provisioned_store().await;
        {
            let session = db.session().await.unwrap();
            session
                .conn()
                .execute_batch(
                    "CREATE TABLE scratch (id INTEGER);
                     ALTER TABLE grp ADD COLUMN grp_colour TEXT;",
                )
                .await
                .unwrap();
        }

        let report = checked(db.verify(&ExpectedSchema::current()).await.unwrap());
        assert!(!report.passed());
        assert!(report.discrepancies.contains(&Discrepancy::UnexpectedTable {
            table: "scratch".into()
        }));
        assert!(report.discrepancies.contains(&Discrepancy::UnexpectedColumn {
            table: "grp".into(),
            column: "grp_colour".into(),
        }));
        assert_eq!(report.discrepancies.len(), 2);
    }

    #[tokio::test]
    async fn expected_table_absent_from_store_is_missing() {
        let (_dir, db) = provisioned_store().await;
        let expected = ExpectedSchema::current().table("audit_log", ["id", "at"]);
        let report = checked(db.verify(&expected).await.unwrap());
        assert_eq!(
            report.discrepancies,
            vec![Discrepancy::MissingTable {
                table: "audit_log".into()
            }]
        );
    }

    #[tokio::test]
    async fn internal_tables_are_ignored() {
        // AUTOINCREMENT creates sqlite_sequence once a row is inserted.
        let (_dir, db) = provisioned_store().await;
        db.seed_master_data().await.unwrap();
        let report = checked(db.verify(&ExpectedSchema::current()).await.unwrap());
        assert!(report.passed(), "{:?}", report.discrepancies);
    }

    #[test]
    fn current_expectation_mirrors_catalogue() {
        let expected = ExpectedSchema::current();
        assert_eq!(expected.table_names().count(), TABLES.len());
        let users = expected.columns("users").unwrap();
        assert!(users.contains("password_hash"));
        assert!(expected.clone().without_table("users").columns("users").is_none());
    }

    #[test]
    fn discrepancy_display() {
        let d = Discrepancy::MissingColumn {
            table: "project".into(),
            column: "proj_status".into(),
        };
        assert_eq!(d.to_string(), "missing column 'project.proj_status'");
    }
}
