//! Runtime terrain backends.
//!
//! Monolithic maps ([`MapOracleImpl`]) and the chunk-streamed overworld
//! ([`ChunkedWorld`]) are registered by id in a [`MapStore`], which the
//! resolver consumes through [`travel_core::TerrainSource`].
mod map;
mod overworld;

use std::collections::HashMap;

use travel_core::{ChunkStreamer, MapId, MapOracle, Position, TerrainKind, TerrainSource};

pub use map::MapOracleImpl;
pub use overworld::{ChunkedWorld, OverworldLayout};

/// What the map-transition subsystem needs to know about a registered map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapDescriptor {
    pub map_id: MapId,
    pub is_chunked: bool,
}

/// Registry of every map the traveler can be on.
#[derive(Default)]
pub struct MapStore {
    chunked: HashMap<MapId, ChunkedWorld>,
    static_maps: HashMap<MapId, MapOracleImpl>,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a chunk-streamed map, replacing any map with the same id.
    pub fn with_chunked(mut self, map: impl Into<MapId>, world: ChunkedWorld) -> Self {
        self.insert_chunked(map, world);
        self
    }

    /// Registers a monolithic map, replacing any map with the same id.
    pub fn with_static(mut self, map: impl Into<MapId>, layout: MapOracleImpl) -> Self {
        self.insert_static(map, layout);
        self
    }

    pub fn insert_chunked(&mut self, map: impl Into<MapId>, world: ChunkedWorld) {
        let map = map.into();
        self.static_maps.remove(&map);
        self.chunked.insert(map, world);
    }

    pub fn insert_static(&mut self, map: impl Into<MapId>, layout: MapOracleImpl) {
        let map = map.into();
        self.chunked.remove(&map);
        self.static_maps.insert(map, layout);
    }

    pub fn contains(&self, map: &MapId) -> bool {
        self.chunked.contains_key(map) || self.static_maps.contains_key(map)
    }

    pub fn descriptor(&self, map: &MapId) -> Option<MapDescriptor> {
        let is_chunked = if self.chunked.contains_key(map) {
            true
        } else if self.static_maps.contains_key(map) {
            false
        } else {
            return None;
        };

        Some(MapDescriptor {
            map_id: map.clone(),
            is_chunked,
        })
    }

    /// Descriptors of every registered map, sorted by id.
    pub fn descriptors(&self) -> Vec<MapDescriptor> {
        let mut descriptors: Vec<_> = self
            .chunked
            .keys()
            .chain(self.static_maps.keys())
            .filter_map(|map| self.descriptor(map))
            .collect();
        descriptors.sort_by(|a, b| a.map_id.cmp(&b.map_id));
        descriptors
    }

    pub fn chunked_world(&self, map: &MapId) -> Option<&ChunkedWorld> {
        self.chunked.get(map)
    }

    /// Changes terrain on a registered map. Returns `false` if the map is
    /// unknown or the position is outside it.
    pub fn set_terrain(&mut self, map: &MapId, position: Position, terrain: TerrainKind) -> bool {
        if let Some(world) = self.chunked.get_mut(map) {
            return world.set_terrain(position, terrain);
        }
        if let Some(layout) = self.static_maps.get_mut(map) {
            return layout.set_terrain(position, terrain);
        }
        false
    }
}

impl TerrainSource for MapStore {
    fn chunk_streamer(&mut self, map: &MapId) -> Option<&mut dyn ChunkStreamer> {
        self.chunked
            .get_mut(map)
            .map(|world| world as &mut dyn ChunkStreamer)
    }

    fn static_map(&self, map: &MapId) -> Option<&dyn MapOracle> {
        self.static_maps.get(map).map(|layout| layout as &dyn MapOracle)
    }
}
