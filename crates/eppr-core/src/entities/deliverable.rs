use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked document (`dvlb`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deliverable {
    pub id: i64,
    pub ewp_id: i64,
    pub code: String,
    pub name: String,
    pub doc_type: Option<String>,
    /// `users.user_id` of the responsible engineer.
    pub responsible_user_id: Option<i64>,
    pub baseline_units: Option<f64>,
    pub forecast_units: Option<f64>,
    pub forecast_comments: Option<String>,
}

/// Insert payload for a deliverable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewDeliverable {
    pub ewp_id: i64,
    pub code: String,
    pub name: String,
    pub doc_type: Option<String>,
    pub responsible_user_id: Option<i64>,
    pub baseline_units: Option<f64>,
    pub forecast_units: Option<f64>,
    pub forecast_comments: Option<String>,
}

/// A dated progress observation of a deliverable (`dvlbprog`).
///
/// Rows are history: each one is a new observation and none is updated
/// after it is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliverableProgress {
    pub id: i64,
    pub deliverable_id: i64,
    pub revision_id: Option<i64>,
    pub ms_type_id: Option<i64>,
    pub ms_value_id: Option<i64>,
    /// Deliverable code at the time of the observation.
    pub doc_code: Option<String>,
    pub progress: Option<f64>,
    pub baseline_units: Option<f64>,
    pub forecast_units: Option<f64>,
    pub earned_value: Option<f64>,
    pub planned_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub status_date: NaiveDate,
}

/// Insert payload for a progress observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProgress {
    pub deliverable_id: i64,
    pub revision_id: Option<i64>,
    pub ms_type_id: Option<i64>,
    pub ms_value_id: Option<i64>,
    pub doc_code: Option<String>,
    pub progress: Option<f64>,
    pub baseline_units: Option<f64>,
    pub forecast_units: Option<f64>,
    pub earned_value: Option<f64>,
    pub planned_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub status_date: NaiveDate,
}
