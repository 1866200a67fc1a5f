//! Table identifiers for the EPPR store.
//!
//! `TableName` is the only way a table name reaches a SQL string. Anything
//! supplied by a caller is parsed into a variant first, so unknown or hostile
//! input never gets interpolated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Every table of the current (surrogate-keyed) schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Group,
    MilestoneType,
    Revision,
    UserRole,
    Discipline,
    Project,
    User,
    Phase,
    MilestoneValue,
    Ewbs,
    Ewp,
    Deliverable,
    DeliverableProgress,
}

impl TableName {
    /// All tables, parents before children.
    pub const ALL: [Self; 13] = [
        Self::Group,
        Self::MilestoneType,
        Self::Revision,
        Self::UserRole,
        Self::Discipline,
        Self::Project,
        Self::User,
        Self::Phase,
        Self::MilestoneValue,
        Self::Ewbs,
        Self::Ewp,
        Self::Deliverable,
        Self::DeliverableProgress,
    ];

    /// The on-disk table name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "grp",
            Self::MilestoneType => "ms_type",
            Self::Revision => "revision",
            Self::UserRole => "userroles",
            Self::Discipline => "discipline",
            Self::Project => "project",
            Self::User => "users",
            Self::Phase => "phase",
            Self::MilestoneValue => "ms_value",
            Self::Ewbs => "ewbs",
            Self::Ewp => "ewp",
            Self::Deliverable => "dvlb",
            Self::DeliverableProgress => "dvlbprog",
        }
    }

    /// Resolve an on-disk table name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|table| table.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CoreError::UnknownTable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("grp", TableName::Group)]
    #[case("PROJECT", TableName::Project)]
    #[case("Phase", TableName::Phase)]
    #[case("  dvlbprog ", TableName::DeliverableProgress)]
    #[case("users", TableName::User)]
    fn resolves_names_case_insensitively(#[case] input: &str, #[case] expected: TableName) {
        assert_eq!(TableName::from_name(input), Some(expected));
    }

    #[rstest]
    #[case("workorder")]
    #[case("project; DROP TABLE grp")]
    #[case("\"project\"")]
    #[case("sqlite_sequence")]
    #[case("")]
    fn rejects_names_outside_the_catalogue(#[case] input: &str) {
        assert_eq!(TableName::from_name(input), None);
        assert!(input.parse::<TableName>().is_err());
    }

    #[test]
    fn all_names_are_distinct() {
        let mut names: Vec<&str> = TableName::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TableName::ALL.len());
    }

    #[test]
    fn display_matches_as_str() {
        for table in TableName::ALL {
            assert_eq!(table.to_string(), table.as_str());
        }
    }
}
