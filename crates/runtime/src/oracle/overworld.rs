//! Chunk-streamed overworld served through [`travel_core::ChunkStreamer`].
use std::collections::{HashMap, HashSet};

use travel_core::{
    CHUNK_AREA, ChunkCoord, ChunkStreamer, MapDimensions, Position, RegionLoad, StaticTile,
    TerrainKind,
};

/// Source terrain the overworld's chunks are cut from.
///
/// Explicit tiles override `default_terrain`; positions outside `bounds` (when
/// set) have no tile at all.
#[derive(Clone, Debug)]
pub struct OverworldLayout {
    default_terrain: TerrainKind,
    bounds: Option<MapDimensions>,
    tiles: HashMap<Position, StaticTile>,
}

impl OverworldLayout {
    pub fn new(default_terrain: TerrainKind) -> Self {
        Self {
            default_terrain,
            bounds: None,
            tiles: HashMap::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: MapDimensions) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_tiles(mut self, tiles: impl IntoIterator<Item = (Position, StaticTile)>) -> Self {
        self.tiles.extend(tiles);
        self
    }

    pub fn terrain_at(&self, position: Position) -> Option<StaticTile> {
        if let Some(bounds) = self.bounds
            && !bounds.contains(position)
        {
            return None;
        }

        Some(
            self.tiles
                .get(&position)
                .copied()
                .unwrap_or(StaticTile::new(self.default_terrain)),
        )
    }

    fn set(&mut self, position: Position, tile: StaticTile) {
        self.tiles.insert(position, tile);
    }
}

struct Chunk {
    tiles: Vec<Option<StaticTile>>,
}

impl Chunk {
    fn cut(coord: ChunkCoord, layout: &OverworldLayout) -> Self {
        let origin = coord.origin();
        let mut tiles = vec![None; CHUNK_AREA];
        for dy in 0..travel_core::CHUNK_SIZE {
            for dx in 0..travel_core::CHUNK_SIZE {
                let position = origin.offset(dx, dy);
                if let Some(slot) = tiles.get_mut(ChunkCoord::local_index(position)) {
                    *slot = layout.terrain_at(position);
                }
            }
        }
        Self { tiles }
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.tiles
            .get(ChunkCoord::local_index(position))
            .copied()
            .flatten()
    }

    fn set(&mut self, position: Position, tile: StaticTile) {
        if let Some(slot) = self.tiles.get_mut(ChunkCoord::local_index(position)) {
            *slot = Some(tile);
        }
    }
}

/// In-memory chunk streamer.
///
/// Keeps a square of `(2 * active_radius + 1)²` chunks resident around the
/// last requested center, plus any chunk the requested reach touches, and
/// drops everything else. Terrain edits are written
/// to the layout so they survive unload/reload.
pub struct ChunkedWorld {
    layout: OverworldLayout,
    active_radius: u32,
    center: Option<ChunkCoord>,
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkedWorld {
    pub fn new(layout: OverworldLayout, active_radius: u32) -> Self {
        Self {
            layout,
            active_radius,
            center: None,
            chunks: HashMap::new(),
        }
    }

    pub fn active_center(&self) -> Option<ChunkCoord> {
        self.center
    }

    pub fn active_radius(&self) -> u32 {
        self.active_radius
    }

    /// Loaded chunk coordinates, sorted.
    pub fn loaded_chunks(&self) -> Vec<ChunkCoord> {
        let mut loaded: Vec<_> = self.chunks.keys().copied().collect();
        loaded.sort_unstable();
        loaded
    }

    /// Changes terrain at `position`. Returns `false` if the position lies
    /// outside the layout's bounds.
    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> bool {
        if self.layout.terrain_at(position).is_none() {
            return false;
        }

        let tile = StaticTile::new(terrain);
        self.layout.set(position, tile);
        if let Some(chunk) = self.chunks.get_mut(&ChunkCoord::containing(position)) {
            chunk.set(position, tile);
        }
        true
    }
}

impl ChunkStreamer for ChunkedWorld {
    fn ensure_active_region(&mut self, target: Position, reach: u32) -> RegionLoad {
        let center = ChunkCoord::containing(target);

        let mut wanted: Vec<ChunkCoord> = center.neighbourhood(self.active_radius).collect();
        for coord in ChunkCoord::covering(target, reach) {
            if !wanted.contains(&coord) {
                wanted.push(coord);
            }
        }
        let wanted_set: HashSet<ChunkCoord> = wanted.iter().copied().collect();

        let mut unloaded: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|coord| !wanted_set.contains(coord))
            .copied()
            .collect();
        unloaded.sort_unstable();
        for coord in &unloaded {
            self.chunks.remove(coord);
        }

        let mut loaded = Vec::new();
        for coord in wanted {
            if !self.chunks.contains_key(&coord) {
                self.chunks.insert(coord, Chunk::cut(coord, &self.layout));
                loaded.push(coord);
            }
        }

        self.center = Some(center);
        RegionLoad {
            center,
            loaded,
            unloaded,
        }
    }

    fn is_chunk_loaded(&self, chunk: ChunkCoord) -> bool {
        self.chunks.contains_key(&chunk)
    }

    fn tile_at(&self, position: Position) -> Option<StaticTile> {
        self.chunks
            .get(&ChunkCoord::containing(position))
            .and_then(|chunk| chunk.tile(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_core::{ChunkedWalkability, WalkabilityOracle};

    fn grassland() -> ChunkedWorld {
        ChunkedWorld::new(OverworldLayout::new(TerrainKind::Grass), 1)
    }

    #[test]
    fn tiles_are_absent_until_region_is_loaded() {
        let mut world = grassland();
        let target = Position::new(10, 10);

        assert_eq!(world.tile_at(target), None);

        let load = world.ensure_active_region(target, 0);
        assert_eq!(load.center, ChunkCoord::new(0, 0));
        assert_eq!(load.loaded.len(), 9);
        assert!(load.unloaded.is_empty());
        assert_eq!(
            world.tile_at(target).map(StaticTile::terrain),
            Some(TerrainKind::Grass)
        );
    }

    #[test]
    fn reloading_the_same_region_is_a_no_op() {
        let mut world = grassland();
        world.ensure_active_region(Position::new(3, 3), 0);

        let load = world.ensure_active_region(Position::new(12, 1), 0);
        assert!(load.is_noop());
    }

    #[test]
    fn moving_the_center_unloads_far_chunks() {
        let mut world = grassland();
        world.ensure_active_region(Position::new(0, 0), 0);

        let load = world.ensure_active_region(Position::new(200, 0), 0);
        assert_eq!(load.unloaded.len(), 9);
        assert_eq!(load.loaded.len(), 9);
        assert!(!world.is_chunk_loaded(ChunkCoord::new(0, 0)));
        assert_eq!(world.tile_at(Position::new(0, 0)), None);
    }

    #[test]
    fn negative_coordinates_resolve_to_the_right_chunk() {
        let layout = OverworldLayout::new(TerrainKind::Grass)
            .with_tiles([(Position::new(-1, -1), StaticTile::new(TerrainKind::Water))]);
        let mut world = ChunkedWorld::new(layout, 0);

        world.ensure_active_region(Position::new(-5, -5), 0);
        assert!(world.is_chunk_loaded(ChunkCoord::new(-1, -1)));
        assert_eq!(
            world.tile_at(Position::new(-1, -1)).map(StaticTile::terrain),
            Some(TerrainKind::Water)
        );
        assert_eq!(world.tile_at(Position::new(0, 0)), None);
    }

    #[test]
    fn edits_survive_unload_and_reload() {
        let mut world = grassland();
        let spot = Position::new(10, 10);
        world.ensure_active_region(spot, 0);

        assert!(world.set_terrain(spot, TerrainKind::Wall));
        assert!(!ChunkedWalkability::new(&world).is_walkable(spot));

        world.ensure_active_region(Position::new(500, 500), 0);
        world.ensure_active_region(spot, 0);
        assert_eq!(world.tile_at(spot).map(StaticTile::terrain), Some(TerrainKind::Wall));
    }

    #[test]
    fn reach_loads_chunks_past_the_active_radius() {
        let mut world = ChunkedWorld::new(OverworldLayout::new(TerrainKind::Grass), 0);

        let load = world.ensure_active_region(Position::new(15, 15), 1);
        assert_eq!(load.center, ChunkCoord::new(0, 0));
        assert_eq!(
            world.loaded_chunks(),
            vec![
                ChunkCoord::new(0, 0),
                ChunkCoord::new(0, 1),
                ChunkCoord::new(1, 0),
                ChunkCoord::new(1, 1),
            ]
        );
        assert!(world.tile_at(Position::new(16, 15)).is_some());

        // Without reach only the center chunk stays resident.
        let load = world.ensure_active_region(Position::new(15, 15), 0);
        assert_eq!(load.unloaded.len(), 3);
        assert_eq!(world.tile_at(Position::new(16, 15)), None);
    }

    #[test]
    fn bounds_leave_outside_tiles_absent() {
        let layout =
            OverworldLayout::new(TerrainKind::Grass).with_bounds(MapDimensions::new(20, 20));
        let mut world = ChunkedWorld::new(layout, 1);
        world.ensure_active_region(Position::new(0, 0), 0);

        assert!(world.tile_at(Position::new(5, 5)).is_some());
        assert_eq!(world.tile_at(Position::new(-1, 0)), None);
        assert!(!world.set_terrain(Position::new(25, 0), TerrainKind::Road));
    }
}
