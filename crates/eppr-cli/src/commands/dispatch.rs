use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Provision => commands::provision::handle(ctx, flags).await,
        Commands::Seed(args) => commands::seed::handle(&args, ctx, flags).await,
        Commands::Read(args) => commands::read::handle(&args, ctx, flags).await,
        Commands::Verify => commands::verify::handle(ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
    }
}
