//! EWBS nodes and work packages.

use eppr_core::entities::{Ewbs, Ewp, NewEwp};
use eppr_core::enums::TableName;

use crate::EpprDb;
use crate::error::DatabaseError;
use crate::helpers::get_opt_f64;

fn row_to_ewbs(row: &libsql::Row) -> Result<Ewbs, DatabaseError> {
    Ok(Ewbs {
        id: row.get::<i64>(0)?,
        phase_id: row.get::<i64>(1)?,
        discipline_id: row.get::<i64>(2)?,
        code: row.get::<String>(3)?,
        name: row.get::<String>(4)?,
    })
}

fn row_to_ewp(row: &libsql::Row) -> Result<Ewp, DatabaseError> {
    Ok(Ewp {
        id: row.get::<i64>(0)?,
        ewbs_id: row.get::<i64>(1)?,
        code: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        baseline_units: get_opt_f64(row, 4)?,
        forecast_units: get_opt_f64(row, 5)?,
    })
}

impl EpprDb {
    pub async fn create_ewbs(
        &self,
        phase_id: i64,
        discipline_id: i64,
        code: &str,
        name: &str,
    ) -> Result<i64, DatabaseError> {
        self.insert_row(
            TableName::Ewbs,
            "INSERT INTO ewbs (phase_id, discipline_id, ewbs_code, ewbs_name) VALUES (?1, ?2, ?3, ?4)",
            libsql::params![phase_id, discipline_id, code, name],
        )
        .await
    }

    pub async fn list_ewbs(&self, phase_id: i64) -> Result<Vec<Ewbs>, DatabaseError> {
        self.select_rows(
            TableName::Ewbs,
            "SELECT ewbs_id, phase_id, discipline_id, ewbs_code, ewbs_name
             FROM ewbs WHERE phase_id = ?1 ORDER BY ewbs_code, ewbs_id",
            [phase_id],
            row_to_ewbs,
        )
        .await
    }

    pub async fn create_ewp(&self, ewp: &NewEwp) -> Result<i64, DatabaseError> {
        self.insert_row(
            TableName::Ewp,
            "INSERT INTO ewp (ewbs_id, ewp_code, ewp_name, ewp_bl_budg_unit, ewp_fct_budg_unit)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                ewp.ewbs_id,
                ewp.code.as_str(),
                ewp.name.as_str(),
                ewp.baseline_units,
                ewp.forecast_units
            ],
        )
        .await
    }

    /// First work package with `code`. EWP codes are indexed, not unique.
    pub async fn get_ewp_by_code(&self, code: &str) -> Result<Option<Ewp>, DatabaseError> {
        self.select_one(
            TableName::Ewp,
            "SELECT ewp_id, ewbs_id, ewp_code, ewp_name, ewp_bl_budg_unit, ewp_fct_budg_unit
             FROM ewp WHERE ewp_code = ?1 ORDER BY ewp_id LIMIT 1",
            [code],
            row_to_ewp,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{seeded_store, work_breakdown};

    #[tokio::test]
    async fn ewbs_under_phase_and_discipline() {
        let (_dir, db) = seeded_store().await;
        let wb = work_breakdown(&db).await;
        let nodes = db.list_ewbs(wb.phase_id).await.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, wb.ewbs_id);
        assert_eq!(nodes[0].discipline_id, wb.discipline_id);
        assert_eq!(db.list_phases(wb.project_id).await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn create_and_get_ewp() {
        let (_dir, db) = seeded_store().await;
        let wb = work_breakdown(&db).await;
        let id = db
            .create_ewp(&NewEwp {
                ewbs_id: wb.ewbs_id,
                code: "EWP-PIP-002".into(),
                name: "Piping isometrics".into(),
                baseline_units: Some(480.0),
                forecast_units: None,
            })
            .await
            .unwrap();

        let ewp = db.get_ewp_by_code("EWP-PIP-002").await.unwrap().unwrap();
        assert_eq!(ewp.id, id);
        assert_eq!(ewp.baseline_units, Some(480.0));
        assert_eq!(ewp.forecast_units, None);
        assert_eq!(db.get_ewp_by_code("EWP-NONE").await.unwrap(), None);
    }

    #[tokio::test]
    async fn ewbs_with_unknown_discipline_is_rejected() {
        let (_dir, db) = seeded_store().await;
        let wb = work_breakdown(&db).await;
        let err = db
            .create_ewbs(wb.phase_id, 9999, "E-X", "Orphan")
            .await
            .unwrap_err();
        assert!(
            matches!(err, DatabaseError::ConstraintViolation { ref table, .. } if table == "ewbs"),
            "{err}"
        );
    }
}
