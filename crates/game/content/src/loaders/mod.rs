//! Content loaders for reading world data from files.
//!
//! Tile lists in every format are `(x, y, terrain)` triples.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod map;
pub mod overworld;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::MapLoader;
pub use overworld::{OverworldData, OverworldLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
