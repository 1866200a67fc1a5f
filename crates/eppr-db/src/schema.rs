//! Schema catalogue: one definition per table and per secondary index.
//!
//! The catalogue is the single source for provisioning DDL, the reader's
//! table/column allow-list and the verifier's default expectation. Table
//! definitions are listed in dependency order (parents first).

use eppr_core::enums::TableName;

/// A table of the current schema generation.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub table: TableName,
    /// Column names in declaration order.
    pub columns: &'static [&'static str],
    pub ddl: &'static str,
}

impl TableDef {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.table.as_str()
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }
}

/// A secondary index.
#[derive(Debug, Clone, Copy)]
pub struct IndexDef {
    pub name: &'static str,
    pub table: TableName,
    pub ddl: &'static str,
}

pub const TABLES: &[TableDef] = &[
    TableDef {
        table: TableName::Group,
        columns: &["grp_id", "grp_code", "grp_name"],
        ddl: "CREATE TABLE IF NOT EXISTS grp (
            grp_id INTEGER PRIMARY KEY AUTOINCREMENT,
            grp_code TEXT NOT NULL,
            grp_name TEXT NOT NULL
        )",
    },
    TableDef {
        table: TableName::MilestoneType,
        columns: &["ms_type_id", "ms_type_code", "ms_type_name"],
        ddl: "CREATE TABLE IF NOT EXISTS ms_type (
            ms_type_id INTEGER PRIMARY KEY AUTOINCREMENT,
            ms_type_code TEXT NOT NULL,
            ms_type_name TEXT NOT NULL
        )",
    },
    TableDef {
        table: TableName::Revision,
        columns: &["revision_id", "rev_code", "rev_descrpt"],
        ddl: "CREATE TABLE IF NOT EXISTS revision (
            revision_id INTEGER PRIMARY KEY AUTOINCREMENT,
            rev_code TEXT NOT NULL,
            rev_descrpt TEXT NOT NULL
        )",
    },
    TableDef {
        table: TableName::UserRole,
        columns: &["role_id", "role_name", "permissions"],
        ddl: "CREATE TABLE IF NOT EXISTS userroles (
            role_id INTEGER PRIMARY KEY AUTOINCREMENT,
            role_name TEXT NOT NULL UNIQUE,
            permissions TEXT
        )",
    },
    TableDef {
        table: TableName::Discipline,
        columns: &["discipline_id", "grp_id", "disc_code", "disc_name"],
        ddl: "CREATE TABLE IF NOT EXISTS discipline (
            discipline_id INTEGER PRIMARY KEY AUTOINCREMENT,
            grp_id INTEGER NOT NULL,
            disc_code TEXT NOT NULL,
            disc_name TEXT NOT NULL,
            FOREIGN KEY (grp_id) REFERENCES grp (grp_id)
        )",
    },
    TableDef {
        table: TableName::Project,
        columns: &[
            "proj_id",
            "proj_code",
            "proj_name",
            "proj_status",
            "proj_start_dt",
            "proj_finish_dt",
        ],
        ddl: "CREATE TABLE IF NOT EXISTS project (
            proj_id INTEGER PRIMARY KEY AUTOINCREMENT,
            proj_code TEXT NOT NULL,
            proj_name TEXT NOT NULL,
            proj_status TEXT,
            proj_start_dt DATE,
            proj_finish_dt DATE
        )",
    },
    TableDef {
        table: TableName::User,
        columns: &[
            "user_id",
            "username",
            "email",
            "password_hash",
            "full_name",
            "role_id",
            "status",
            "created_at",
            "last_login",
            "department",
        ],
        ddl: "CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            full_name TEXT,
            role_id INTEGER,
            status TEXT NOT NULL DEFAULT 'active',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            last_login TIMESTAMP,
            department TEXT,
            FOREIGN KEY (role_id) REFERENCES userroles (role_id)
        )",
    },
    TableDef {
        table: TableName::Phase,
        columns: &["phase_id", "project_id", "phase_code", "phase_name"],
        ddl: "CREATE TABLE IF NOT EXISTS phase (
            phase_id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER NOT NULL,
            phase_code TEXT NOT NULL,
            phase_name TEXT NOT NULL,
            FOREIGN KEY (project_id) REFERENCES project (proj_id)
        )",
    },
    TableDef {
        table: TableName::MilestoneValue,
        columns: &[
            "ms_value_id",
            "ms_type_id",
            "ms_value_code",
            "ms_value_name",
            "ms_value_cum_wtg",
            "ms_value_seq_number",
        ],
        ddl: "CREATE TABLE IF NOT EXISTS ms_value (
            ms_value_id INTEGER PRIMARY KEY AUTOINCREMENT,
            ms_type_id INTEGER NOT NULL,
            ms_value_code TEXT NOT NULL,
            ms_value_name TEXT,
            ms_value_cum_wtg REAL,
            ms_value_seq_number INTEGER,
            FOREIGN KEY (ms_type_id) REFERENCES ms_type (ms_type_id)
        )",
    },
    TableDef {
        table: TableName::Ewbs,
        columns: &["ewbs_id", "phase_id", "discipline_id", "ewbs_code", "ewbs_name"],
        ddl: "CREATE TABLE IF NOT EXISTS ewbs (
            ewbs_id INTEGER PRIMARY KEY AUTOINCREMENT,
            phase_id INTEGER NOT NULL,
            discipline_id INTEGER NOT NULL,
            ewbs_code TEXT NOT NULL,
            ewbs_name TEXT NOT NULL,
            FOREIGN KEY (phase_id) REFERENCES phase (phase_id),
            FOREIGN KEY (discipline_id) REFERENCES discipline (discipline_id)
        )",
    },
    TableDef {
        table: TableName::Ewp,
        columns: &[
            "ewp_id",
            "ewbs_id",
            "ewp_code",
            "ewp_name",
            "ewp_bl_budg_unit",
            "ewp_fct_budg_unit",
        ],
        ddl: "CREATE TABLE IF NOT EXISTS ewp (
            ewp_id INTEGER PRIMARY KEY AUTOINCREMENT,
            ewbs_id INTEGER NOT NULL,
            ewp_code TEXT NOT NULL,
            ewp_name TEXT NOT NULL,
            ewp_bl_budg_unit REAL,
            ewp_fct_budg_unit REAL,
            FOREIGN KEY (ewbs_id) REFERENCES ewbs (ewbs_id)
        )",
    },
    TableDef {
        table: TableName::Deliverable,
        columns: &[
            "doc_id",
            "ewp_id",
            "doc_code",
            "doc_name",
            "doc_type",
            "doc_responsible",
            "doc_bl_budg_unit",
            "doc_fct_budg_unit",
            "doc_fcst_comments",
        ],
        ddl: "CREATE TABLE IF NOT EXISTS dvlb (
            doc_id INTEGER PRIMARY KEY AUTOINCREMENT,
            ewp_id INTEGER NOT NULL,
            doc_code TEXT NOT NULL UNIQUE,
            doc_name TEXT NOT NULL,
            doc_type TEXT,
            doc_responsible INTEGER,
            doc_bl_budg_unit REAL,
            doc_fct_budg_unit REAL,
            doc_fcst_comments TEXT,
            FOREIGN KEY (ewp_id) REFERENCES ewp (ewp_id),
            FOREIGN KEY (doc_responsible) REFERENCES users (user_id)
        )",
    },
    TableDef {
        table: TableName::DeliverableProgress,
        columns: &[
            "prog_id",
            "doc_id",
            "rev_id",
            "ms_type_id",
            "ms_value_id",
            "doc_code",
            "doc_progress",
            "doc_bl_budg_unit",
            "doc_fct_budg_unit",
            "doc_earned_val",
            "doc_pln_date",
            "doc_act_date",
            "doc_status_date",
        ],
        ddl: "CREATE TABLE IF NOT EXISTS dvlbprog (
            prog_id INTEGER PRIMARY KEY AUTOINCREMENT,
            doc_id INTEGER NOT NULL,
            rev_id INTEGER,
            ms_type_id INTEGER,
            ms_value_id INTEGER,
            doc_code TEXT,
            doc_progress REAL,
            doc_bl_budg_unit REAL,
            doc_fct_budg_unit REAL,
            doc_earned_val REAL,
            doc_pln_date DATE,
            doc_act_date DATE,
            doc_status_date DATE NOT NULL,
            FOREIGN KEY (doc_id) REFERENCES dvlb (doc_id),
            FOREIGN KEY (rev_id) REFERENCES revision (revision_id),
            FOREIGN KEY (ms_type_id) REFERENCES ms_type (ms_type_id),
            FOREIGN KEY (ms_value_id) REFERENCES ms_value (ms_value_id)
        )",
    },
];

pub const INDEXES: &[IndexDef] = &[
    IndexDef {
        name: "idx_grp_code",
        table: TableName::Group,
        ddl: "CREATE INDEX IF NOT EXISTS idx_grp_code ON grp (grp_code)",
    },
    IndexDef {
        name: "idx_discipline_grp_code",
        table: TableName::Discipline,
        ddl: "CREATE INDEX IF NOT EXISTS idx_discipline_grp_code ON discipline (grp_id, disc_code)",
    },
    IndexDef {
        name: "idx_project_code",
        table: TableName::Project,
        ddl: "CREATE INDEX IF NOT EXISTS idx_project_code ON project (proj_code)",
    },
    IndexDef {
        name: "idx_phase_project_code",
        table: TableName::Phase,
        ddl: "CREATE INDEX IF NOT EXISTS idx_phase_project_code ON phase (project_id, phase_code)",
    },
    IndexDef {
        name: "idx_ms_value_type_seq",
        table: TableName::MilestoneValue,
        ddl: "CREATE INDEX IF NOT EXISTS idx_ms_value_type_seq ON ms_value (ms_type_id, ms_value_seq_number)",
    },
    IndexDef {
        name: "idx_ewbs_code",
        table: TableName::Ewbs,
        ddl: "CREATE INDEX IF NOT EXISTS idx_ewbs_code ON ewbs (ewbs_code)",
    },
    IndexDef {
        name: "idx_ewp_code",
        table: TableName::Ewp,
        ddl: "CREATE INDEX IF NOT EXISTS idx_ewp_code ON ewp (ewp_code)",
    },
    IndexDef {
        name: "idx_dvlb_code",
        table: TableName::Deliverable,
        ddl: "CREATE INDEX IF NOT EXISTS idx_dvlb_code ON dvlb (doc_code)",
    },
    IndexDef {
        name: "idx_dvlbprog_doc_status",
        table: TableName::DeliverableProgress,
        ddl: "CREATE INDEX IF NOT EXISTS idx_dvlbprog_doc_status ON dvlbprog (doc_id, doc_status_date)",
    },
];

/// Look up the definition of a table.
///
/// `TABLES` is laid out in `TableName` declaration order.
#[must_use]
pub const fn table_def(table: TableName) -> &'static TableDef {
    &TABLES[table as usize]
}
