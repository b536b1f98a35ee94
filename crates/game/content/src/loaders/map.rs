//! Static map loader.
//!
//! Loads terrain for fully resident maps (dungeon floors, interiors).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use travel_core::{MapDimensions, Position, StaticTile, TerrainKind};

use crate::loaders::{LoadResult, read_file};

fn default_fill() -> TerrainKind {
    TerrainKind::Wall
}

/// Map data structure for RON files (terrain only).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    /// Terrain for every tile not listed in `tiles`.
    #[serde(default = "default_fill")]
    fill: TerrainKind,
    tiles: Vec<(i32, i32, TerrainKind)>,
}

/// Loader for static map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load map data from a RON file.
    ///
    /// Returns dimensions and the complete tile set. Unlisted tiles take the
    /// `fill` terrain, which defaults to `Wall`.
    pub fn load(path: &Path) -> LoadResult<(MapDimensions, HashMap<Position, StaticTile>)> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid map {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<(MapDimensions, HashMap<Position, StaticTile>)> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let dimensions = MapDimensions::new(data.dimensions.0, data.dimensions.1);
        let width = i32::try_from(dimensions.width)?;
        let height = i32::try_from(dimensions.height)?;

        let mut tiles: HashMap<Position, StaticTile> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .map(|position| (position, StaticTile::new(data.fill)))
            .collect();

        for (x, y, terrain) in data.tiles {
            let position = Position::new(x, y);
            if !dimensions.contains(position) {
                anyhow::bail!(
                    "tile {} lies outside the {}x{} map",
                    position,
                    dimensions.width,
                    dimensions.height
                );
            }
            tiles.insert(position, StaticTile::new(terrain));
        }

        Ok((dimensions, tiles))
    }
}
