use serde::{Deserialize, Serialize};

/// Work breakdown node under a phase and discipline (`ewbs`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ewbs {
    pub id: i64,
    pub phase_id: i64,
    pub discipline_id: i64,
    pub code: String,
    pub name: String,
}

/// A budgeted work package (`ewp`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ewp {
    pub id: i64,
    pub ewbs_id: i64,
    pub code: String,
    pub name: String,
    pub baseline_units: Option<f64>,
    pub forecast_units: Option<f64>,
}

/// Insert payload for a work package.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewEwp {
    pub ewbs_id: i64,
    pub code: String,
    pub name: String,
    pub baseline_units: Option<f64>,
    pub forecast_units: Option<f64>,
}
