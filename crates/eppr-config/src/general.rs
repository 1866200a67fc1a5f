//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default row limit for `eppr read`.
const fn default_limit() -> u32 {
    200
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default row limit for table reads when `--limit` is not given.
    /// `0` disables the limit.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    /// The effective limit, `None` when reads are unbounded.
    #[must_use]
    pub const fn read_limit(&self) -> Option<u32> {
        if self.default_limit == 0 {
            None
        } else {
            Some(self.default_limit)
        }
    }
}
