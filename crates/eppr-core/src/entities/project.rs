use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked work order (`project`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
}

/// Insert payload for a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProject {
    pub code: String,
    pub name: String,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
}

/// A lifecycle stage of one project (`phase`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Phase {
    pub id: i64,
    pub project_id: i64,
    pub code: String,
    pub name: String,
}
