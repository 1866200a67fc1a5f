use eppr_config::EpprConfig;
use eppr_db::EpprDb;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
///
/// Holds only a store handle; each command opens its own session.
pub struct AppContext {
    pub db: EpprDb,
    pub config: EpprConfig,
}

impl AppContext {
    /// `--db` wins over `database.path` from configuration.
    pub fn init(config: EpprConfig, flags: &GlobalFlags) -> Self {
        let db = flags
            .db
            .as_deref()
            .map_or_else(|| EpprDb::from_config(&config.database), EpprDb::new);
        tracing::debug!(path = %db.path().display(), "store location resolved");
        Self { db, config }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags(db: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            db: db.map(str::to_string),
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn config_path_is_the_default() {
        let ctx = AppContext::init(EpprConfig::default(), &flags(None));
        assert_eq!(ctx.db.path(), Path::new(eppr_config::DEFAULT_DB_PATH));
    }

    #[test]
    fn db_flag_overrides_config() {
        let ctx = AppContext::init(EpprConfig::default(), &flags(Some("/srv/eppr/site.db")));
        assert_eq!(ctx.db.path(), Path::new("/srv/eppr/site.db"));
    }

    #[tokio::test]
    async fn db_flag_store_is_the_one_provisioned() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("site").join("eppr.db");
        let ctx = AppContext::init(
            EpprConfig::default(),
            &flags(Some(path.to_str().unwrap())),
        );

        assert!(!ctx.db.exists());
        ctx.db.provision().await.unwrap();
        assert!(path.exists());

        let data = ctx.db.read_table("project", None).await.unwrap().unwrap();
        assert!(data.is_empty());
    }
}
