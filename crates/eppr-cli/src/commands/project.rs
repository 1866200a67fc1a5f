use eppr_core::entities::NewProject;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ProjectAddArgs, ProjectCommands};
use crate::context::AppContext;
use crate::output::output;

/// Handle `eppr project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Add(args) => add(args, ctx, flags).await,
        ProjectCommands::List => {
            let projects = ctx.db.list_projects().await?;
            output(&projects, flags.format)
        }
    }
}

async fn add(args: &ProjectAddArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let payload = new_project(args);
    let id = ctx.db.create_project(&payload).await?;
    let project = ctx.db.get_project_by_code(&payload.code).await?;
    tracing::info!(id, code = %payload.code, "project created");
    output(&project, flags.format)
}

fn new_project(args: &ProjectAddArgs) -> NewProject {
    NewProject {
        code: args.code.trim().to_string(),
        name: args.name.trim().to_string(),
        status: args.status.clone(),
        start_date: args.start,
        finish_date: args.finish,
    }
}
