//! Shared fixtures for in-crate tests.

use eppr_core::entities::NewProject;
use tempfile::TempDir;

use crate::EpprDb;

/// A store handle pointing into a fresh temp dir. The file does not exist
/// yet; keep the `TempDir` alive for the duration of the test.
pub fn temp_store() -> (TempDir, EpprDb) {
    let dir = TempDir::new().expect("temp dir");
    let db = EpprDb::new(dir.path().join("db").join("eppr.db"));
    (dir, db)
}

/// A provisioned, empty store.
pub async fn provisioned_store() -> (TempDir, EpprDb) {
    let (dir, db) = temp_store();
    db.provision().await.expect("provision");
    (dir, db)
}

/// A provisioned store with the standard master data.
pub async fn seeded_store() -> (TempDir, EpprDb) {
    let (dir, db) = provisioned_store().await;
    db.seed_master_data().await.expect("seed master data");
    (dir, db)
}

/// Ids of a minimal project → phase → EWBS chain.
pub struct WorkBreakdown {
    pub project_id: i64,
    pub phase_id: i64,
    pub discipline_id: i64,
    pub ewbs_id: i64,
}

/// Project `WO-1001` with its standard phases and one piping EWBS node under
/// engineering. Expects a seeded store.
pub async fn work_breakdown(db: &EpprDb) -> WorkBreakdown {
    let project_id = db
        .create_project(&NewProject {
            code: "WO-1001".into(),
            name: "Tank farm".into(),
            ..NewProject::default()
        })
        .await
        .expect("project");
    db.seed_standard_phases("WO-1001").await.expect("phases");
    let phase_id = db
        .find_phase_id("WO-1001", "ENG")
        .await
        .expect("phase lookup")
        .expect("ENG phase");
    let discipline_id = db
        .find_discipline_id("ENG", "PIP")
        .await
        .expect("discipline lookup")
        .expect("PIP discipline");
    let ewbs_id = db
        .create_ewbs(phase_id, discipline_id, "E-ENG-PIP", "Engineering / Piping")
        .await
        .expect("ewbs");
    WorkBreakdown {
        project_id,
        phase_id,
        discipline_id,
        ewbs_id,
    }
}
