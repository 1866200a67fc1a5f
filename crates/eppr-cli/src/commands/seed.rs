use eppr_db::master_data::MasterDataReport;
use eppr_db::seed::DependentSeedReport;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SeedArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SeedResponse {
    master_data: MasterDataReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    phases: Option<DependentSeedReport>,
    warnings: Vec<String>,
}

/// Handle `eppr seed`.
pub async fn handle(args: &SeedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let master_data = ctx.db.seed_master_data().await?;
    let phases = match args.project.as_deref() {
        Some(code) => Some(ctx.db.seed_standard_phases(code).await?),
        None => None,
    };

    let warnings = master_data
        .disciplines
        .warnings
        .iter()
        .chain(phases.iter().flat_map(|report| report.warnings.iter()))
        .map(ToString::to_string)
        .collect();

    output(
        &SeedResponse {
            master_data,
            phases,
            warnings,
        },
        flags.format,
    )
}
