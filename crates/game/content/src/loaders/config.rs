//! Travel configuration loader.

use std::path::Path;

use travel_core::TravelConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for travel configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`TravelConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<TravelConfig> {
        let content = read_file(path)?;
        let config: TravelConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
