//! Function configuration.

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Path to the `RocksDB` data directory (default: "/data/cardpack").
    pub data_dir: String,

    /// Maximum concurrent instances the platform may run (default: 10).
    ///
    /// Surfaced to the host platform for cost control; not consulted by the
    /// handler itself.
    pub max_instances: u32,
}

impl ProvisionConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/cardpack".into()),
            max_instances: std::env::var("MAX_INSTANCES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            data_dir: "/data/cardpack".into(),
            max_instances: 10,
        }
    }
}
