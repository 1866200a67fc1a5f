//! Project and phase repository.

use eppr_core::entities::{NewProject, Phase, Project};
use eppr_core::enums::TableName;

use crate::EpprDb;
use crate::error::DatabaseError;
use crate::helpers::{format_date, get_opt_string, parse_optional_date};

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    let start = get_opt_string(row, 4)?;
    let finish = get_opt_string(row, 5)?;
    Ok(Project {
        id: row.get::<i64>(0)?,
        code: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        status: get_opt_string(row, 3)?,
        start_date: parse_optional_date(start.as_deref())?,
        finish_date: parse_optional_date(finish.as_deref())?,
    })
}

fn row_to_phase(row: &libsql::Row) -> Result<Phase, DatabaseError> {
    Ok(Phase {
        id: row.get::<i64>(0)?,
        project_id: row.get::<i64>(1)?,
        code: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
    })
}

const PROJECT_COLUMNS: &str =
    "proj_id, proj_code, proj_name, proj_status, proj_start_dt, proj_finish_dt";

impl EpprDb {
    /// Insert a project.
    pub async fn create_project(&self, project: &NewProject) -> Result<i64, DatabaseError> {
        self.insert_row(
            TableName::Project,
            "INSERT INTO project (proj_code, proj_name, proj_status, proj_start_dt, proj_finish_dt)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                project.code.as_str(),
                project.name.as_str(),
                project.status.as_deref(),
                project.start_date.map(format_date),
                project.finish_date.map(format_date)
            ],
        )
        .await
    }

    pub async fn get_project_by_code(&self, code: &str) -> Result<Option<Project>, DatabaseError> {
        self.select_one(
            TableName::Project,
            &format!(
                "SELECT {PROJECT_COLUMNS} FROM project WHERE proj_code = ?1 ORDER BY proj_id LIMIT 1"
            ),
            [code],
            row_to_project,
        )
        .await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        self.select_rows(
            TableName::Project,
            &format!("SELECT {PROJECT_COLUMNS} FROM project ORDER BY proj_code, proj_id"),
            (),
            row_to_project,
        )
        .await
    }

    pub async fn create_phase(
        &self,
        project_id: i64,
        code: &str,
        name: &str,
    ) -> Result<i64, DatabaseError> {
        self.insert_row(
            TableName::Phase,
            "INSERT INTO phase (project_id, phase_code, phase_name) VALUES (?1, ?2, ?3)",
            libsql::params![project_id, code, name],
        )
        .await
    }

    /// Phase id for `(project code, phase code)`.
    pub async fn find_phase_id(
        &self,
        project_code: &str,
        phase_code: &str,
    ) -> Result<Option<i64>, DatabaseError> {
        self.select_one(
            TableName::Phase,
            "SELECT ph.phase_id FROM phase ph
             JOIN project p ON p.proj_id = ph.project_id
             WHERE p.proj_code = ?1 AND ph.phase_code = ?2
             ORDER BY ph.phase_id LIMIT 1",
            libsql::params![project_code, phase_code],
            |row| Ok(row.get::<i64>(0)?),
        )
        .await
    }

    pub async fn list_phases(&self, project_id: i64) -> Result<Vec<Phase>, DatabaseError> {
        self.select_rows(
            TableName::Phase,
            "SELECT phase_id, project_id, phase_code, phase_name
             FROM phase WHERE project_id = ?1 ORDER BY phase_id",
            [project_id],
            row_to_phase,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{provisioned_store, temp_store};

    fn tank_farm() -> NewProject {
        NewProject {
            code: "WO-1001".into(),
            name: "Tank farm".into(),
            status: Some("active".into()),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6),
            finish_date: NaiveDate::from_ymd_opt(2025, 12, 19),
        }
    }

    #[tokio::test]
    async fn create_and_get_project() {
        let (_dir, db) = provisioned_store().await;
        let id = db.create_project(&tank_farm()).await.unwrap();

        let project = db.get_project_by_code("WO-1001").await.unwrap().unwrap();
        assert_eq!(project.id, id);
        assert_eq!(project.name, "Tank farm");
        assert_eq!(project.status.as_deref(), Some("active"));
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(project.finish_date, NaiveDate::from_ymd_opt(2025, 12, 19));
    }

    #[tokio::test]
    async fn project_without_dates() {
        let (_dir, db) = provisioned_store().await;
        db.create_project(&NewProject {
            code: "WO-2".into(),
            name: "Jetty".into(),
            ..NewProject::default()
        })
        .await
        .unwrap();
        let project = db.get_project_by_code("WO-2").await.unwrap().unwrap();
        assert_eq!(project.status, None);
        assert_eq!(project.start_date, None);
    }

    #[tokio::test]
    async fn dates_are_stored_without_ordering_rules() {
        let (_dir, db) = provisioned_store().await;
        let mut project = tank_farm();
        project.start_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        project.finish_date = NaiveDate::from_ymd_opt(2025, 1, 1);
        db.create_project(&project).await.unwrap();

        let stored = db.get_project_by_code("WO-1001").await.unwrap().unwrap();
        assert_eq!(stored.start_date, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(stored.finish_date, NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[tokio::test]
    async fn unknown_project_is_none() {
        let (_dir, db) = provisioned_store().await;
        assert_eq!(db.get_project_by_code("NOPE").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_projects_by_code() {
        let (_dir, db) = provisioned_store().await;
        for code in ["WO-3", "WO-1", "WO-2"] {
            db.create_project(&NewProject {
                code: code.into(),
                name: code.into(),
                ..NewProject::default()
            })
            .await
            .unwrap();
        }
        let codes: Vec<String> = db
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.code)
            .collect();
        assert_eq!(codes, vec!["WO-1", "WO-2", "WO-3"]);
    }

    #[tokio::test]
    async fn phases_resolve_through_project_code() {
        let (_dir, db) = provisioned_store().await;
        let project_id = db.create_project(&tank_farm()).await.unwrap();
        let eng = db.create_phase(project_id, "ENG", "Engineering").await.unwrap();
        db.create_phase(project_id, "CON", "Construction").await.unwrap();

        assert_eq!(db.find_phase_id("WO-1001", "ENG").await.unwrap(), Some(eng));
        assert_eq!(db.find_phase_id("WO-9999", "ENG").await.unwrap(), None);
        assert_eq!(db.list_phases(project_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn phase_for_missing_project_is_a_constraint_violation() {
        let (_dir, db) = provisioned_store().await;
        let err = db.create_phase(404, "ENG", "Engineering").await.unwrap_err();
        assert!(
            matches!(err, DatabaseError::ConstraintViolation { ref table, .. } if table == "phase"),
            "{err}"
        );
    }

    #[tokio::test]
    async fn repos_need_a_provisioned_store() {
        let (_dir, db) = temp_store();
        let err = db.list_projects().await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotProvisioned(_)), "{err}");
    }
}
