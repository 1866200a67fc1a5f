//! Reference data lookups and milestone values.

use eppr_core::entities::{Discipline, Group, MilestoneValue, NewMilestoneValue, Revision};
use eppr_core::enums::TableName;

use crate::EpprDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_f64, get_opt_string, quote_ident};
use crate::schema::table_def;
use crate::seed::ReferenceTable;

fn row_to_group(row: &libsql::Row) -> Result<Group, DatabaseError> {
    Ok(Group {
        id: row.get::<i64>(0)?,
        code: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
    })
}

fn row_to_discipline(row: &libsql::Row) -> Result<Discipline, DatabaseError> {
    Ok(Discipline {
        id: row.get::<i64>(0)?,
        group_id: row.get::<i64>(1)?,
        code: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
    })
}

fn row_to_revision(row: &libsql::Row) -> Result<Revision, DatabaseError> {
    Ok(Revision {
        id: row.get::<i64>(0)?,
        code: row.get::<String>(1)?,
        description: row.get::<String>(2)?,
    })
}

fn row_to_milestone_value(row: &libsql::Row) -> Result<MilestoneValue, DatabaseError> {
    Ok(MilestoneValue {
        id: row.get::<i64>(0)?,
        ms_type_id: row.get::<i64>(1)?,
        code: row.get::<String>(2)?,
        name: get_opt_string(row, 3)?,
        cumulative_weight: get_opt_f64(row, 4)?,
        sequence: row.get::<Option<i64>>(5)?,
    })
}

impl EpprDb {
    /// Surrogate id of the reference row with natural key `code`.
    ///
    /// When the key is duplicated the lowest id wins, matching the seeder.
    pub async fn find_id_by_code(
        &self,
        table: ReferenceTable,
        code: &str,
    ) -> Result<Option<i64>, DatabaseError> {
        let def = table_def(table.table());
        let sql = format!(
            "SELECT {id} FROM {tbl} WHERE {key} = ?1 ORDER BY {id} LIMIT 1",
            id = quote_ident(def.columns[0]),
            tbl = quote_ident(def.name()),
            key = quote_ident(table.key_column()),
        );
        self.select_one(table.table(), &sql, [code], |row| Ok(row.get::<i64>(0)?))
            .await
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, DatabaseError> {
        self.select_rows(
            TableName::Group,
            "SELECT grp_id, grp_code, grp_name FROM grp ORDER BY grp_code, grp_id",
            (),
            row_to_group,
        )
        .await
    }

    pub async fn list_disciplines(&self, group_id: i64) -> Result<Vec<Discipline>, DatabaseError> {
        self.select_rows(
            TableName::Discipline,
            "SELECT discipline_id, grp_id, disc_code, disc_name
             FROM discipline WHERE grp_id = ?1 ORDER BY disc_code, discipline_id",
            [group_id],
            row_to_discipline,
        )
        .await
    }

    /// Discipline id for `(group code, discipline code)`.
    pub async fn find_discipline_id(
        &self,
        group_code: &str,
        discipline_code: &str,
    ) -> Result<Option<i64>, DatabaseError> {
        self.select_one(
            TableName::Discipline,
            "SELECT d.discipline_id FROM discipline d
             JOIN grp g ON g.grp_id = d.grp_id
             WHERE g.grp_code = ?1 AND d.disc_code = ?2
             ORDER BY d.discipline_id LIMIT 1",
            libsql::params![group_code, discipline_code],
            |row| Ok(row.get::<i64>(0)?),
        )
        .await
    }

    pub async fn list_revisions(&self) -> Result<Vec<Revision>, DatabaseError> {
        self.select_rows(
            TableName::Revision,
            "SELECT revision_id, rev_code, rev_descrpt FROM revision ORDER BY revision_id",
            (),
            row_to_revision,
        )
        .await
    }

    pub async fn create_milestone_value(
        &self,
        value: &NewMilestoneValue,
    ) -> Result<i64, DatabaseError> {
        self.insert_row(
            TableName::MilestoneValue,
            "INSERT INTO ms_value (ms_type_id, ms_value_code, ms_value_name, ms_value_cum_wtg, ms_value_seq_number)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                value.ms_type_id,
                value.code.as_str(),
                value.name.as_deref(),
                value.cumulative_weight,
                value.sequence
            ],
        )
        .await
    }

    /// Milestone values of one type, in sequence order.
    pub async fn list_milestone_values(
        &self,
        ms_type_id: i64,
    ) -> Result<Vec<MilestoneValue>, DatabaseError> {
        self.select_rows(
            TableName::MilestoneValue,
            "SELECT ms_value_id, ms_type_id, ms_value_code, ms_value_name, ms_value_cum_wtg, ms_value_seq_number
             FROM ms_value WHERE ms_type_id = ?1
             ORDER BY ms_value_seq_number, ms_value_id",
            [ms_type_id],
            row_to_milestone_value,
        )
        .await
    }
}
