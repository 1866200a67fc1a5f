//! User accounts.

use eppr_core::entities::{NewUser, User, UserRole};
use eppr_core::enums::TableName;

use crate::EpprDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_datetime};

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    let last_login = get_opt_string(row, 8)?;
    Ok(User {
        id: row.get::<i64>(0)?,
        username: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        password_hash: row.get::<String>(3)?,
        full_name: get_opt_string(row, 4)?,
        role_id: row.get::<Option<i64>>(5)?,
        status: row.get::<String>(6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        last_login: parse_optional_datetime(last_login.as_deref())?,
        department: get_opt_string(row, 9)?,
    })
}

fn row_to_role(row: &libsql::Row) -> Result<UserRole, DatabaseError> {
    Ok(UserRole {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        permissions: get_opt_string(row, 2)?,
    })
}

impl EpprDb {
    /// Insert a user. Status defaults to `active` and `created_at` to now.
    ///
    /// The password is stored as given; hashing is the caller's job.
    pub async fn create_user(&self, user: &NewUser) -> Result<i64, DatabaseError> {
        self.insert_row(
            TableName::User,
            "INSERT INTO users (username, email, password_hash, full_name, role_id, department)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                user.username.as_str(),
                user.email.as_str(),
                user.password_hash.as_str(),
                user.full_name.as_deref(),
                user.role_id,
                user.department.as_deref()
            ],
        )
        .await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        self.select_one(
            TableName::User,
            "SELECT user_id, username, email, password_hash, full_name, role_id, status,
                    created_at, last_login, department
             FROM users WHERE username = ?1",
            [username],
            row_to_user,
        )
        .await
    }

    pub async fn list_user_roles(&self) -> Result<Vec<UserRole>, DatabaseError> {
        self.select_rows(
            TableName::UserRole,
            "SELECT role_id, role_name, permissions FROM userroles ORDER BY role_id",
            (),
            row_to_role,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::seed::ReferenceTable;
    use crate::test_support::seeded_store;

    fn planner(role_id: Option<i64>) -> NewUser {
        NewUser {
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            password_hash: "$argon2id$stub".into(),
            full_name: Some("J. Doe".into()),
            role_id,
            department: None,
        }
    }

    #[tokio::test]
    async fn create_and_get_user() {
        let (_dir, db) = seeded_store().await;
        let role = db
            .find_id_by_code(ReferenceTable::UserRole, "planner")
            .await
            .unwrap();
        let id = db.create_user(&planner(role)).await.unwrap();

        let user = db.get_user_by_username("jdoe").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role_id, role);
        assert_eq!(user.status, "active");
        assert_eq!(user.last_login, None);
        assert_eq!(user.department, None);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_constraint_violation() {
        let (_dir, db) = seeded_store().await;
        db.create_user(&planner(None)).await.unwrap();

        let mut again = planner(None);
        again.email = "other@example.com".into();
        let err = db.create_user(&again).await.unwrap_err();
        assert!(
            matches!(err, DatabaseError::ConstraintViolation { ref table, .. } if table == "users"),
            "{err}"
        );
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let (_dir, db) = seeded_store().await;
        let err = db.create_user(&planner(Some(9999))).await.unwrap_err();
        assert!(
            matches!(err, DatabaseError::ConstraintViolation { .. }),
            "{err}"
        );
    }

    #[tokio::test]
    async fn roles_carry_permissions() {
        let (_dir, db) = seeded_store().await;
        let roles = db.list_user_roles().await.unwrap();
        let admin = roles.iter().find(|r| r.name == "admin").unwrap();
        let perms: serde_json::Value =
            serde_json::from_str(admin.permissions.as_deref().unwrap()).unwrap();
        assert_eq!(perms["admin"], serde_json::Value::Bool(true));
    }
}
