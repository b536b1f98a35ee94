//! Content factory for loading the world description from data files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use travel_core::{LocationCatalog, MapDimensions, MapId, Position, StaticTile, TravelConfig};

use crate::loaders::{
    CatalogLoader, ConfigLoader, LoadResult, MapLoader, OverworldData, OverworldLoader,
};

/// Content factory that loads all world content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── catalog.ron
/// ├── overworld.ron
/// └── maps/
///     ├── crypt-1.ron
///     └── watchtower.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load travel configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<TravelConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Like [`Self::load_config`], but a missing `config.toml` yields the defaults.
    pub fn load_config_or_default(&self) -> LoadResult<TravelConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(TravelConfig::default())
        }
    }

    /// Load the catalog seed from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<LocationCatalog> {
        let path = self.data_dir.join("catalog.ron");
        CatalogLoader::load(&path)
    }

    /// Load the overworld layout from `overworld.ron`.
    pub fn load_overworld(&self) -> LoadResult<OverworldData> {
        let path = self.data_dir.join("overworld.ron");
        OverworldLoader::load(&path)
    }

    /// Load a static map from `maps/{map_id}.ron`.
    pub fn load_map(
        &self,
        map_id: &MapId,
    ) -> LoadResult<(MapDimensions, HashMap<Position, StaticTile>)> {
        let path = self.maps_dir().join(format!("{}.ron", map_id));
        MapLoader::load(&path)
    }

    /// Ids of every static map in `maps/`, sorted. A missing directory means
    /// there are none.
    pub fn map_ids(&self) -> LoadResult<Vec<MapId>> {
        let dir = self.maps_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?
        {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("ron")
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                ids.push(MapId::new(stem));
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn maps_dir(&self) -> PathBuf {
        self.data_dir.join("maps")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use travel_core::{LocationId, TerrainKind};

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_a_complete_data_directory() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.toml", "max_search_radius = 5\n");
        write(
            dir.path(),
            "catalog.ron",
            r#"[("oakvale", Town, "Oakvale", (10, 10))]"#,
        );
        write(dir.path(), "overworld.ron", "(default_terrain: Grass)");
        write(
            dir.path(),
            "maps/crypt-1.ron",
            "(dimensions: (4, 4), tiles: [(1, 1, Floor)])",
        );
        write(dir.path(), "maps/notes.txt", "ignored");

        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap().max_search_radius, 5);
        assert!(
            factory
                .load_catalog()
                .unwrap()
                .contains(&LocationId::new("oakvale"))
        );
        assert_eq!(
            factory.load_overworld().unwrap().default_terrain,
            TerrainKind::Grass
        );
        assert_eq!(factory.map_ids().unwrap(), vec![MapId::new("crypt-1")]);

        let (dimensions, tiles) = factory.load_map(&MapId::new("crypt-1")).unwrap();
        assert_eq!(dimensions, MapDimensions::new(4, 4));
        assert!(tiles[&Position::new(1, 1)].is_passable());
    }

    #[test]
    fn missing_optional_files_fall_back() {
        let dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config_or_default().unwrap(), TravelConfig::default());
        assert!(factory.map_ids().unwrap().is_empty());
        assert!(factory.load_catalog().is_err());
    }
}
