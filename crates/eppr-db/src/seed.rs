//! Master-Data Seeder.
//!
//! Two patterns, both idempotent and both one transaction per call:
//!
//! - **Reference seeding** for lookup tables keyed by a natural code: insert
//!   each row whose code is not present yet.
//! - **Dependent seeding** for tables whose rows name their parent by natural
//!   code: resolve the parent's surrogate id first, skip (and warn about) rows
//!   whose parent does not exist, skip rows already present under that parent.
//!
//! A store error anywhere in a batch rolls the whole call back.

use std::collections::HashMap;
use std::fmt;

use eppr_core::enums::TableName;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::EpprDb;
use crate::error::DatabaseError;

/// Lookup tables populated by [`EpprDb::seed_reference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceTable {
    Group,
    MilestoneType,
    Revision,
    UserRole,
}

impl ReferenceTable {
    #[must_use]
    pub const fn table(self) -> TableName {
        match self {
            Self::Group => TableName::Group,
            Self::MilestoneType => TableName::MilestoneType,
            Self::Revision => TableName::Revision,
            Self::UserRole => TableName::UserRole,
        }
    }

    /// Column holding the natural key.
    #[must_use]
    pub const fn key_column(self) -> &'static str {
        match self {
            Self::Group => "grp_code",
            Self::MilestoneType => "ms_type_code",
            Self::Revision => "rev_code",
            Self::UserRole => "role_name",
        }
    }

    /// Column holding the display value (name, description, permissions).
    #[must_use]
    pub const fn value_column(self) -> &'static str {
        match self {
            Self::Group => "grp_name",
            Self::MilestoneType => "ms_type_name",
            Self::Revision => "rev_descrpt",
            Self::UserRole => "permissions",
        }
    }
}

/// One reference row: natural key plus display value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub code: String,
    pub value: String,
}

impl ReferenceRow {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
        }
    }
}

impl From<(&str, &str)> for ReferenceRow {
    fn from((code, value): (&str, &str)) -> Self {
        Self::new(code, value)
    }
}

/// Tables populated by [`EpprDb::seed_dependent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependentTable {
    /// Disciplines under a group, parent resolved by `grp_code`.
    Discipline,
    /// Phases under a project, parent resolved by `proj_code`.
    Phase,
}

/// Column names involved in one dependent seeding run.
struct DependentColumns {
    parent: TableName,
    parent_id: &'static str,
    parent_code: &'static str,
    child: TableName,
    child_fk: &'static str,
    child_code: &'static str,
    child_name: &'static str,
}

impl DependentTable {
    #[must_use]
    pub const fn table(self) -> TableName {
        self.columns().child
    }

    #[must_use]
    pub const fn parent(self) -> TableName {
        self.columns().parent
    }

    const fn columns(self) -> DependentColumns {
        match self {
            Self::Discipline => DependentColumns {
                parent: TableName::Group,
                parent_id: "grp_id",
                parent_code: "grp_code",
                child: TableName::Discipline,
                child_fk: "grp_id",
                child_code: "disc_code",
                child_name: "disc_name",
            },
            Self::Phase => DependentColumns {
                parent: TableName::Project,
                parent_id: "proj_id",
                parent_code: "proj_code",
                child: TableName::Phase,
                child_fk: "project_id",
                child_code: "phase_code",
                child_name: "phase_name",
            },
        }
    }
}

/// One dependent row identified by its parent's natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentRow {
    pub parent_code: String,
    pub code: String,
    pub name: String,
}

impl DependentRow {
    pub fn new(
        parent_code: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            parent_code: parent_code.into(),
            code: code.into(),
            name: name.into(),
        }
    }
}

impl From<(&str, &str, &str)> for DependentRow {
    fn from((parent_code, code, name): (&str, &str, &str)) -> Self {
        Self::new(parent_code, code, name)
    }
}

/// A dependent row skipped because its parent code did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedWarning {
    pub parent_table: TableName,
    pub parent_code: String,
    pub code: String,
}

impl fmt::Display for SeedWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no {} row with code '{}' (skipped '{}')",
            self.parent_table, self.parent_code, self.code
        )
    }
}

/// Outcome of a dependent seeding call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependentSeedReport {
    pub table: TableName,
    pub added: usize,
    /// Rows not inserted: already present, or parent unresolved.
    pub skipped: usize,
    /// One entry per unresolved parent.
    pub warnings: Vec<SeedWarning>,
}

impl EpprDb {
    /// Insert every row whose natural key is not yet present in `table`.
    ///
    /// Duplicates (against the store or earlier in `rows`) are skipped, so
    /// repeated calls with the same input insert each code once in total.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store is missing or a statement fails;
    /// nothing from this call is committed in that case.
    pub async fn seed_reference(
        &self,
        table: ReferenceTable,
        rows: &[ReferenceRow],
    ) -> Result<usize, DatabaseError> {
        let name = table.table().as_str();
        let session = self.session().await?;
        let tx = session
            .conn()
            .transaction()
            .await
            .map_err(|e| DatabaseError::on_table(name, "begin", &e))?;

        let result = insert_reference_rows(&tx, table, rows).await;
        let inserted = finish_transaction(tx, result, name).await?;

        info!(table = name, inserted, candidates = rows.len(), "reference rows seeded");
        Ok(inserted)
    }

    /// Insert dependent rows after resolving each parent code to its id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store is missing or a statement fails;
    /// nothing from this call is committed in that case. Unresolvable parents
    /// are not errors; they are reported as warnings.
    pub async fn seed_dependent(
        &self,
        table: DependentTable,
        rows: &[DependentRow],
    ) -> Result<DependentSeedReport, DatabaseError> {
        let name = table.table().as_str();
        let session = self.session().await?;
        let tx = session
            .conn()
            .transaction()
            .await
            .map_err(|e| DatabaseError::on_table(name, "begin", &e))?;

        let result = insert_dependent_rows(&tx, table, rows).await;
        let report = finish_transaction(tx, result, name).await?;

        info!(
            table = name,
            added = report.added,
            skipped = report.skipped,
            warnings = report.warnings.len(),
            "dependent rows seeded"
        );
        Ok(report)
    }
}

async fn insert_reference_rows(
    conn: &libsql::Connection,
    table: ReferenceTable,
    rows: &[ReferenceRow],
) -> Result<usize, DatabaseError> {
    let name = table.table().as_str();
    let key = table.key_column();
    let exists_sql = format!("SELECT 1 FROM {name} WHERE {key} = ?1 LIMIT 1");
    let insert_sql = format!(
        "INSERT INTO {name} ({key}, {value}) VALUES (?1, ?2)",
        value = table.value_column()
    );

    let mut inserted = 0;
    for row in rows {
        let mut found = conn
            .query(&exists_sql, [row.code.as_str()])
            .await
            .map_err(|e| DatabaseError::on_table(name, "lookup", &e))?;
        if found.next().await?.is_some() {
            debug!(table = name, code = %row.code, "already present");
            continue;
        }

        conn.execute(
            &insert_sql,
            libsql::params![row.code.as_str(), row.value.as_str()],
        )
        .await
        .map_err(|e| DatabaseError::on_table(name, "insert", &e))?;
        inserted += 1;
    }
    Ok(inserted)
}

async fn insert_dependent_rows(
    conn: &libsql::Connection,
    table: DependentTable,
    rows: &[DependentRow],
) -> Result<DependentSeedReport, DatabaseError> {
    let cols = table.columns();
    let parents = parent_ids(conn, &cols).await?;

    let child = cols.child.as_str();
    let exists_sql = format!(
        "SELECT 1 FROM {child} WHERE {fk} = ?1 AND {code} = ?2 LIMIT 1",
        fk = cols.child_fk,
        code = cols.child_code
    );
    let insert_sql = format!(
        "INSERT INTO {child} ({fk}, {code}, {name}) VALUES (?1, ?2, ?3)",
        fk = cols.child_fk,
        code = cols.child_code,
        name = cols.child_name
    );

    let mut report = DependentSeedReport {
        table: cols.child,
        added: 0,
        skipped: 0,
        warnings: Vec::new(),
    };

    for row in rows {
        let Some(&parent_id) = parents.get(&row.parent_code) else {
            warn!(
                table = child,
                parent = cols.parent.as_str(),
                parent_code = %row.parent_code,
                code = %row.code,
                "parent code not found, skipping row"
            );
            report.skipped += 1;
            report.warnings.push(SeedWarning {
                parent_table: cols.parent,
                parent_code: row.parent_code.clone(),
                code: row.code.clone(),
            });
            continue;
        };

        let mut found = conn
            .query(&exists_sql, libsql::params![parent_id, row.code.as_str()])
            .await
            .map_err(|e| DatabaseError::on_table(child, "lookup", &e))?;
        if found.next().await?.is_some() {
            debug!(table = child, parent_id, code = %row.code, "already present");
            report.skipped += 1;
            continue;
        }

        conn.execute(
            &insert_sql,
            libsql::params![parent_id, row.code.as_str(), row.name.as_str()],
        )
        .await
        .map_err(|e| DatabaseError::on_table(child, "insert", &e))?;
        report.added += 1;
    }

    Ok(report)
}

/// Natural code -> surrogate id for the parent table. When a code appears
/// more than once the lowest id wins.
async fn parent_ids(
    conn: &libsql::Connection,
    cols: &DependentColumns,
) -> Result<HashMap<String, i64>, DatabaseError> {
    let parent = cols.parent.as_str();
    let sql = format!(
        "SELECT {id}, {code} FROM {parent} ORDER BY {id}",
        id = cols.parent_id,
        code = cols.parent_code
    );
    let mut rows = conn
        .query(&sql, ())
        .await
        .map_err(|e| DatabaseError::on_table(parent, "lookup", &e))?;

    let mut ids = HashMap::new();
    while let Some(row) = rows.next().await? {
        let id = row.get::<i64>(0)?;
        let code = row.get::<String>(1)?;
        ids.entry(code).or_insert(id);
    }
    Ok(ids)
}

/// Commit on success, roll back on failure. The original error wins over a
/// rollback failure.
async fn finish_transaction<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
    table: &str,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| DatabaseError::on_table(table, "commit", &e))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = tx.rollback().await {
                warn!(table, error = %rollback, "rollback failed");
            }
            Err(err)
        }
    }
}
