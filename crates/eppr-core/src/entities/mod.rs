//! Entity structs for every EPPR table.
//!
//! Read models carry the store-generated surrogate id. `New*` structs are the
//! insert payloads for entities with more than a code and a name; the id is
//! never part of an insert.

mod deliverable;
mod master;
mod project;
mod user;
mod work;

pub use deliverable::{Deliverable, DeliverableProgress, NewDeliverable, NewProgress};
pub use master::{Discipline, Group, MilestoneType, MilestoneValue, NewMilestoneValue, Revision};
pub use project::{NewProject, Phase, Project};
pub use user::{NewUser, User, UserRole};
pub use work::{Ewbs, Ewp, NewEwp};

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dates_serialize_as_iso_text() {
        let project = Project {
            id: 1,
            code: "WO-1001".into(),
            name: "Tank farm".into(),
            status: None,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6),
            finish_date: None,
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["start_date"], "2025-01-06");
        assert_eq!(json["finish_date"], serde_json::Value::Null);
    }

    #[test]
    fn new_user_defaults_are_empty() {
        let user = NewUser::default();
        assert_eq!(user.role_id, None);
        assert!(user.username.is_empty());
    }
}
