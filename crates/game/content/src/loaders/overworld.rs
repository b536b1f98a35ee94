//! Overworld layout loader.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use travel_core::{MapDimensions, Position, StaticTile, TerrainKind};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OverworldDataRon {
    default_terrain: TerrainKind,
    #[serde(default)]
    bounds: Option<(u32, u32)>,
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>,
}

/// Source data for the chunk-streamed overworld.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverworldData {
    pub default_terrain: TerrainKind,
    pub bounds: Option<MapDimensions>,
    pub tiles: HashMap<Position, StaticTile>,
}

/// Loader for the overworld layout from RON files.
pub struct OverworldLoader;

impl OverworldLoader {
    /// Load the overworld layout from a RON file.
    ///
    /// ```ron
    /// (
    ///     default_terrain: Grass,
    ///     bounds: Some((256, 256)),
    ///     tiles: [(10, 11, Road), (12, 12, Water)],
    /// )
    /// ```
    pub fn load(path: &Path) -> LoadResult<OverworldData> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid overworld {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<OverworldData> {
        let data: OverworldDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse overworld RON: {}", e))?;

        let bounds = data
            .bounds
            .map(|(width, height)| MapDimensions::new(width, height));

        let mut tiles = HashMap::with_capacity(data.tiles.len());
        for (x, y, terrain) in data.tiles {
            let position = Position::new(x, y);
            if let Some(bounds) = bounds
                && !bounds.contains(position)
            {
                anyhow::bail!("tile {} lies outside the overworld bounds", position);
            }
            tiles.insert(position, StaticTile::new(terrain));
        }

        Ok(OverworldData {
            default_terrain: data.default_terrain,
            bounds,
            tiles,
        })
    }
}
