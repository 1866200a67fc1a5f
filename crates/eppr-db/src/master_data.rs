//! Standard reference data loaded by `eppr seed`.
//!
//! These are starting sets; all seeding is idempotent, so sites can extend
//! the tables afterwards without the defaults being re-inserted.

use serde::Serialize;

use crate::EpprDb;
use crate::error::DatabaseError;
use crate::seed::{DependentRow, DependentSeedReport, DependentTable, ReferenceRow, ReferenceTable};

pub const GROUPS: &[(&str, &str)] = &[
    ("MGT", "Management"),
    ("ENG", "Engineering"),
    ("PRC", "Procurement"),
    ("CON", "Construction"),
];

/// `(group code, discipline code, discipline name)`.
pub const DISCIPLINES: &[(&str, &str, &str)] = &[
    ("MGT", "PM", "Project Management"),
    ("MGT", "PC", "Project Controls"),
    ("ENG", "CIV", "Civil"),
    ("ENG", "STR", "Structural"),
    ("ENG", "MEC", "Mechanical"),
    ("ENG", "PIP", "Piping"),
    ("ENG", "ELE", "Electrical"),
    ("ENG", "INS", "Instrumentation"),
    ("PRC", "PUR", "Purchasing"),
    ("CON", "SIT", "Site Works"),
];

pub const MILESTONE_TYPES: &[(&str, &str)] = &[
    ("DWG", "Drawing"),
    ("DOC", "Document"),
    ("CAL", "Calculation"),
    ("SPC", "Specification"),
];

pub const REVISIONS: &[(&str, &str)] = &[
    ("A", "Issued for Review"),
    ("B", "Issued for Approval"),
    ("C", "Re-issued for Approval"),
    ("0", "Issued for Construction"),
    ("1", "Revised for Construction"),
];

/// `(role name, permissions blob)`.
pub const USER_ROLES: &[(&str, &str)] = &[
    ("admin", r#"{"read":true,"write":true,"admin":true}"#),
    ("planner", r#"{"read":true,"write":true,"admin":false}"#),
    ("viewer", r#"{"read":true,"write":false,"admin":false}"#),
];

/// Lifecycle phases created for a project by `eppr seed --project`.
pub const PHASES: &[(&str, &str)] = &[
    ("PM", "Project Management"),
    ("ENG", "Engineering"),
    ("DES", "Design"),
    ("PROC", "Procurement"),
    ("CON", "Construction"),
    ("COMM", "Commissioning"),
];

fn reference_rows(rows: &[(&str, &str)]) -> Vec<ReferenceRow> {
    rows.iter().copied().map(ReferenceRow::from).collect()
}

/// Inserted counts for one run of [`EpprDb::seed_master_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasterDataReport {
    pub groups: usize,
    pub milestone_types: usize,
    pub revisions: usize,
    pub user_roles: usize,
    pub disciplines: DependentSeedReport,
}

impl EpprDb {
    /// Seed the standard groups, disciplines, milestone types, revisions and
    /// user roles. Each table is its own call (and transaction).
    ///
    /// # Errors
    ///
    /// Returns the first `DatabaseError` hit; tables seeded before it stay
    /// committed.
    pub async fn seed_master_data(&self) -> Result<MasterDataReport, DatabaseError> {
        let groups = self
            .seed_reference(ReferenceTable::Group, &reference_rows(GROUPS))
            .await?;
        let milestone_types = self
            .seed_reference(ReferenceTable::MilestoneType, &reference_rows(MILESTONE_TYPES))
            .await?;
        let revisions = self
            .seed_reference(ReferenceTable::Revision, &reference_rows(REVISIONS))
            .await?;
        let user_roles = self
            .seed_reference(ReferenceTable::UserRole, &reference_rows(USER_ROLES))
            .await?;

        let discipline_rows: Vec<DependentRow> =
            DISCIPLINES.iter().copied().map(DependentRow::from).collect();
        let disciplines = self
            .seed_dependent(DependentTable::Discipline, &discipline_rows)
            .await?;

        Ok(MasterDataReport {
            groups,
            milestone_types,
            revisions,
            user_roles,
            disciplines,
        })
    }

    /// Seed the standard phases under the project with code `project_code`.
    ///
    /// An unknown project code is reported as a warning in the returned
    /// report, one per phase.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store is missing or a statement fails.
    pub async fn seed_standard_phases(
        &self,
        project_code: &str,
    ) -> Result<DependentSeedReport, DatabaseError> {
        let rows: Vec<DependentRow> = PHASES
            .iter()
            .map(|(code, name)| DependentRow::new(project_code, *code, *name))
            .collect();
        self.seed_dependent(DependentTable::Phase, &rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::provisioned_store;

    #[tokio::test]
    async fn master_data_seeds_once() {
        let (_dir, db) = provisioned_store().await;

        let first = db.seed_master_data().await.unwrap();
        assert_eq!(first.groups, GROUPS.len());
        assert_eq!(first.milestone_types, MILESTONE_TYPES.len());
        assert_eq!(first.revisions, REVISIONS.len());
        assert_eq!(first.user_roles, USER_ROLES.len());
        assert_eq!(first.disciplines.added, DISCIPLINES.len());
        assert!(first.disciplines.warnings.is_empty());

        let second = db.seed_master_data().await.unwrap();
        assert_eq!(second.groups, 0);
        assert_eq!(second.revisions, 0);
        assert_eq!(second.disciplines.added, 0);
        assert_eq!(second.disciplines.skipped, DISCIPLINES.len());
    }

    #[tokio::test]
    async fn phases_for_unknown_project_are_warnings() {
        let (_dir, db) = provisioned_store().await;
        let report = db.seed_standard_phases("NOPE").await.unwrap();
        assert_eq!(report.added, 0);
        assert_eq!(report.warnings.len(), PHASES.len());
    }

    #[test]
    fn every_discipline_names_a_seeded_group() {
        for (group, code, _) in DISCIPLINES {
            assert!(
                GROUPS.iter().any(|(g, _)| g == group),
                "discipline {code} references unknown group {group}"
            );
        }
    }
}
