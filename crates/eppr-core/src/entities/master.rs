use serde::{Deserialize, Serialize};

/// Top-level organizational grouping (`grp`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// Engineering discipline within a group (`discipline`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Discipline {
    pub id: i64,
    pub group_id: i64,
    pub code: String,
    pub name: String,
}

/// Classification of progress milestones (`ms_type`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MilestoneType {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// A weighted point on a milestone curve (`ms_value`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MilestoneValue {
    pub id: i64,
    pub ms_type_id: i64,
    pub code: String,
    pub name: Option<String>,
    /// Cumulative weight reached at this point, as a fraction or percentage
    /// depending on how the curve was loaded.
    pub cumulative_weight: Option<f64>,
    pub sequence: Option<i64>,
}

/// Insert payload for a milestone value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMilestoneValue {
    pub ms_type_id: i64,
    pub code: String,
    pub name: Option<String>,
    pub cumulative_weight: Option<f64>,
    pub sequence: Option<i64>,
}

/// A document revision marker (`revision`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Revision {
    pub id: i64,
    pub code: String,
    pub description: String,
}
