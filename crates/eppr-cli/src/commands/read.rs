use anyhow::bail;
use eppr_db::reader::RowFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReadArgs;
use crate::context::AppContext;
use crate::output::output_rows;

/// Handle `eppr read`.
pub async fn handle(args: &ReadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = match args.limit {
        Some(0) => None,
        Some(limit) => Some(limit),
        None => ctx.config.general.read_limit(),
    };
    let filter = build_filter(&args.conditions, limit)?;

    let Some(data) = ctx.db.read_table(&args.table, Some(&filter)).await? else {
        bail!(
            "store {} does not exist; run 'eppr provision' first",
            ctx.db.path().display()
        );
    };
    output_rows(&data, flags.format)
}

/// Turn `column=value` arguments into a filter. Values are compared as text.
fn build_filter(conditions: &[String], limit: Option<u32>) -> anyhow::Result<RowFilter> {
    let mut filter = RowFilter::new();
    for condition in conditions {
        let Some((column, value)) = condition.split_once('=') else {
            bail!("invalid --where '{condition}': expected COLUMN=VALUE");
        };
        let column = column.trim();
        if column.is_empty() {
            bail!("invalid --where '{condition}': column name is empty");
        }
        filter = filter.eq(column, value);
    }
    if let Some(limit) = limit {
        filter = filter.limit(limit);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use eppr_config::EpprConfig;
    use eppr_db::reader::Cell;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::OutputFormat;

    fn read_args(table: &str) -> ReadArgs {
        ReadArgs {
            table: table.into(),
            conditions: Vec::new(),
            limit: None,
        }
    }

    fn flags_for(path: &std::path::Path) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            db: Some(path.display().to_string()),
            quiet: true,
            verbose: false,
        }
    }

    #[test]
    fn conditions_split_on_first_equals() {
        let filter = build_filter(
            &["doc_fcst_comments=a=b".to_string(), " proj_code =WO-1".to_string()],
            Some(10),
        )
        .unwrap();
        assert_eq!(
            filter.conditions,
            vec![
                ("doc_fcst_comments".to_string(), Cell::Text("a=b".into())),
                ("proj_code".to_string(), Cell::Text("WO-1".into())),
            ]
        );
        assert_eq!(filter.limit, Some(10));
    }

    #[test]
    fn condition_without_equals_is_rejected() {
        let err = build_filter(&["proj_code".to_string()], None).unwrap_err();
        assert!(err.to_string().contains("COLUMN=VALUE"));
    }

    #[test]
    fn empty_column_is_rejected() {
        assert!(build_filter(&["=x".to_string()], None).is_err());
    }

    #[tokio::test]
    async fn missing_store_fails_without_creating_it() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("eppr.db");
        let flags = flags_for(&path);
        let ctx = AppContext::init(EpprConfig::default(), &flags);

        let err = handle(&read_args("project"), &ctx, &flags)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("eppr provision"), "{err}");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn provisioned_store_reads_empty_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let flags = flags_for(&dir.path().join("eppr.db"));
        let ctx = AppContext::init(EpprConfig::default(), &flags);
        ctx.db.provision().await.unwrap();

        handle(&read_args("phase"), &ctx, &flags).await.unwrap();
    }
}
