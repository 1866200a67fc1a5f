use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `eppr provision`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx
        .db
        .provision()
        .await
        .with_context(|| format!("failed to provision {}", ctx.db.path().display()))?;
    output(&report, flags.format)
}
