//! Deliverables and their progress history.

use eppr_core::entities::{Deliverable, DeliverableProgress, NewDeliverable, NewProgress};
use eppr_core::enums::TableName;

use crate::EpprDb;
use crate::error::DatabaseError;
use crate::helpers::{format_date, get_opt_f64, get_opt_string, parse_date, parse_optional_date};

fn row_to_deliverable(row: &libsql::Row) -> Result<Deliverable, DatabaseError> {
    Ok(Deliverable {
        id: row.get::<i64>(0)?,
        ewp_id: row.get::<i64>(1)?,
        code: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        doc_type: get_opt_string(row, 4)?,
        responsible_user_id: row.get::<Option<i64>>(5)?,
        baseline_units: get_opt_f64(row, 6)?,
        forecast_units: get_opt_f64(row, 7)?,
        forecast_comments: get_opt_string(row, 8)?,
    })
}

fn row_to_progress(row: &libsql::Row) -> Result<DeliverableProgress, DatabaseError> {
    let planned = get_opt_string(row, 10)?;
    let actual = get_opt_string(row, 11)?;
    Ok(DeliverableProgress {
        id: row.get::<i64>(0)?,
        deliverable_id: row.get::<i64>(1)?,
        revision_id: row.get::<Option<i64>>(2)?,
        ms_type_id: row.get::<Option<i64>>(3)?,
        ms_value_id: row.get::<Option<i64>>(4)?,
        doc_code: get_opt_string(row, 5)?,
        progress: get_opt_f64(row, 6)?,
        baseline_units: get_opt_f64(row, 7)?,
        forecast_units: get_opt_f64(row, 8)?,
        earned_value: get_opt_f64(row, 9)?,
        planned_date: parse_optional_date(planned.as_deref())?,
        actual_date: parse_optional_date(actual.as_deref())?,
        status_date: parse_date(&row.get::<String>(12)?)?,
    })
}

impl EpprDb {
    pub async fn create_deliverable(&self, doc: &NewDeliverable) -> Result<i64, DatabaseError> {
        self.insert_row(
            TableName::Deliverable,
            "INSERT INTO dvlb (ewp_id, doc_code, doc_name, doc_type, doc_responsible,
                               doc_bl_budg_unit, doc_fct_budg_unit, doc_fcst_comments)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            libsql::params![
                doc.ewp_id,
                doc.code.as_str(),
                doc.name.as_str(),
                doc.doc_type.as_deref(),
                doc.responsible_user_id,
                doc.baseline_units,
                doc.forecast_units,
                doc.forecast_comments.as_deref()
            ],
        )
        .await
    }

    pub async fn get_deliverable_by_code(
        &self,
        code: &str,
    ) -> Result<Option<Deliverable>, DatabaseError> {
        self.select_one(
            TableName::Deliverable,
            "SELECT doc_id, ewp_id, doc_code, doc_name, doc_type, doc_responsible,
                    doc_bl_budg_unit, doc_fct_budg_unit, doc_fcst_comments
             FROM dvlb WHERE doc_code = ?1",
            [code],
            row_to_deliverable,
        )
        .await
    }

    /// Append a progress observation. Earlier observations are never touched.
    pub async fn record_progress(&self, progress: &NewProgress) -> Result<i64, DatabaseError> {
        self.insert_row(
            TableName::DeliverableProgress,
            "INSERT INTO dvlbprog (doc_id, rev_id, ms_type_id, ms_value_id, doc_code, doc_progress,
                                   doc_bl_budg_unit, doc_fct_budg_unit, doc_earned_val,
                                   doc_pln_date, doc_act_date, doc_status_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            libsql::params![
                progress.deliverable_id,
                progress.revision_id,
                progress.ms_type_id,
                progress.ms_value_id,
                progress.doc_code.as_deref(),
                progress.progress,
                progress.baseline_units,
                progress.forecast_units,
                progress.earned_value,
                progress.planned_date.map(format_date),
                progress.actual_date.map(format_date),
                format_date(progress.status_date)
            ],
        )
        .await
    }

    /// Progress history of one deliverable, oldest status date first.
    pub async fn list_progress(
        &self,
        deliverable_id: i64,
    ) -> Result<Vec<DeliverableProgress>, DatabaseError> {
        self.select_rows(
            TableName::DeliverableProgress,
            "SELECT prog_id, doc_id, rev_id, ms_type_id, ms_value_id, doc_code, doc_progress,
                    doc_bl_budg_unit, doc_fct_budg_unit, doc_earned_val,
                    doc_pln_date, doc_act_date, doc_status_date
             FROM dvlbprog WHERE doc_id = ?1
             ORDER BY doc_status_date, prog_id",
            [deliverable_id],
            row_to_progress,
        )
        .await
    }
}
