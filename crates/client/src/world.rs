//! Turns loaded content into the runtime's terrain backends.
use anyhow::{Context, Result};
use tracing::debug;

use travel_content::{ContentFactory, OverworldData};
use travel_core::{LocationCatalog, MapId, TravelConfig};
use travel_runtime::{ChunkedWorld, MapOracleImpl, MapStore, OverworldLayout};

/// Everything the runtime is seeded with.
pub struct World {
    pub config: TravelConfig,
    pub catalog: LocationCatalog,
    pub maps: MapStore,
}

impl World {
    /// Loads the catalog and terrain. `config` must already carry every
    /// override, since the home map and chunk radius are fixed here.
    pub fn load(factory: &ContentFactory, config: TravelConfig) -> Result<Self> {
        let catalog = factory.load_catalog()?;
        let overworld = factory.load_overworld()?;

        let mut maps = MapStore::new().with_chunked(
            config.home_map.clone(),
            chunked_world(overworld, config.active_region_radius),
        );

        for map_id in factory.map_ids()? {
            if map_id == config.home_map {
                anyhow::bail!("static map '{}' shadows the home map", map_id);
            }
            let (dimensions, tiles) = factory
                .load_map(&map_id)
                .with_context(|| format!("loading map '{}'", map_id))?;
            debug!(
                map = %map_id,
                width = dimensions.width,
                height = dimensions.height,
                "map loaded"
            );
            maps.insert_static(map_id, MapOracleImpl::new(dimensions, tiles));
        }

        Ok(Self {
            config,
            catalog,
            maps,
        })
    }

    pub fn home_map(&self) -> &MapId {
        &self.config.home_map
    }
}

fn chunked_world(data: OverworldData, active_radius: u32) -> ChunkedWorld {
    let mut layout = OverworldLayout::new(data.default_terrain).with_tiles(data.tiles);
    if let Some(bounds) = data.bounds {
        layout = layout.with_bounds(bounds);
    }
    ChunkedWorld::new(layout, active_radius)
}
