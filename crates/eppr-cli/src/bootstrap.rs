use anyhow::Context;
use eppr_config::EpprConfig;

/// Load layered configuration, picking up a `.env` in the working directory.
pub fn load_config() -> anyhow::Result<EpprConfig> {
    EpprConfig::load_with_dotenv().context("failed to load eppr configuration")
}
