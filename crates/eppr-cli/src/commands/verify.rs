use anyhow::bail;
use eppr_db::verify::{ExpectedSchema, Verification};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `eppr verify`. Prints the outcome, then fails unless it passed.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let verification = ctx.db.verify(&ExpectedSchema::current()).await?;
    output(&verification, flags.format)?;

    match &verification {
        Verification::NotProvisioned { path } => {
            bail!("store {path} is not provisioned; run 'eppr provision' first")
        }
        Verification::Checked(report) if !report.passed() => {
            for discrepancy in &report.discrepancies {
                tracing::warn!(%discrepancy, "schema mismatch");
            }
            bail!(
                "schema verification failed with {} discrepancies",
                report.discrepancies.len()
            )
        }
        Verification::Checked(_) => Ok(()),
    }
}
