use std::sync::{Arc, OnceLock};

use super::StaticConfig;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to in-memory defaults when `init_config()` has not run,
/// so library users that never touch the config layer still get a
/// working resolver.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| Arc::new(StaticConfig::default()))
        .clone()
}

/// Initialize the global configuration
///
/// Loads configuration from `path` (or "ipfinder.toml" in the current
/// directory). If the file doesn't exist, uses in-memory defaults.
/// Later calls are ignored.
///
/// # Examples
/// ```no_run
/// use ipfinder::config::init_config;
/// init_config(None);
/// ```
pub fn init_config(path: Option<&str>) -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| Arc::new(StaticConfig::load(path)))
        .clone()
}
