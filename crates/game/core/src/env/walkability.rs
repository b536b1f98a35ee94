use super::{ChunkCoord, ChunkStreamer, MapOracle, StaticTile};
use crate::state::Position;

/// Answers "can the traveler stand on this tile" for the active map.
pub trait WalkabilityOracle {
    fn is_walkable(&self, position: Position) -> bool;
}

impl<T: WalkabilityOracle + ?Sized> WalkabilityOracle for &T {
    fn is_walkable(&self, position: Position) -> bool {
        (**self).is_walkable(position)
    }
}

/// Walkability over a chunk-streamed map.
///
/// A tile counts only if its chunk is loaded and the tile is present and
/// passable. Unloaded or absent tiles are never walkable.
pub struct ChunkedWalkability<'a, C: ChunkStreamer + ?Sized> {
    chunks: &'a C,
}

impl<'a, C: ChunkStreamer + ?Sized> ChunkedWalkability<'a, C> {
    pub fn new(chunks: &'a C) -> Self {
        Self { chunks }
    }
}

impl<C: ChunkStreamer + ?Sized> WalkabilityOracle for ChunkedWalkability<'_, C> {
    fn is_walkable(&self, position: Position) -> bool {
        self.chunks.is_chunk_loaded(ChunkCoord::containing(position))
            && self
                .chunks
                .tile_at(position)
                .is_some_and(StaticTile::is_passable)
    }
}

/// Walkability over a fully resident, bounded map.
pub struct MonolithicWalkability<'a, M: MapOracle + ?Sized> {
    map: &'a M,
}

impl<'a, M: MapOracle + ?Sized> MonolithicWalkability<'a, M> {
    pub fn new(map: &'a M) -> Self {
        Self { map }
    }
}

impl<M: MapOracle + ?Sized> WalkabilityOracle for MonolithicWalkability<'_, M> {
    fn is_walkable(&self, position: Position) -> bool {
        self.map.is_walkable(position)
    }
}

/// The oracle matching the active map's storage model.
pub enum ActiveTerrain<'a> {
    Chunked(ChunkedWalkability<'a, dyn ChunkStreamer + 'a>),
    Monolithic(MonolithicWalkability<'a, dyn MapOracle + 'a>),
}

impl<'a> ActiveTerrain<'a> {
    pub fn chunked(chunks: &'a (dyn ChunkStreamer + 'a)) -> Self {
        Self::Chunked(ChunkedWalkability::new(chunks))
    }

    pub fn monolithic(map: &'a (dyn MapOracle + 'a)) -> Self {
        Self::Monolithic(MonolithicWalkability::new(map))
    }
}

impl WalkabilityOracle for ActiveTerrain<'_> {
    fn is_walkable(&self, position: Position) -> bool {
        match self {
            ActiveTerrain::Chunked(oracle) => oracle.is_walkable(position),
            ActiveTerrain::Monolithic(oracle) => oracle.is_walkable(position),
        }
    }
}
