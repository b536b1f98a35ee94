//! Traits describing the terrain fast travel lands on.
//!
//! Maps come in two storage models: monolithic layouts served by
//! [`MapOracle`] and streamed overworlds served by [`ChunkStreamer`]. The
//! [`TerrainSource`] bundle hands out whichever one backs a given [`MapId`] so
//! the resolver never reaches for a global map registry.
mod chunk;
mod map;
mod walkability;

use crate::state::MapId;

pub use chunk::{CHUNK_AREA, CHUNK_SIZE, ChunkCoord, ChunkStreamer, RegionLoad};
pub use map::{MapDimensions, MapOracle, StaticTile, TerrainKind};
pub use walkability::{
    ActiveTerrain, ChunkedWalkability, MonolithicWalkability, WalkabilityOracle,
};

/// Lookup of terrain backends by map id.
pub trait TerrainSource: Send {
    /// Chunk subsystem of a streamed map, or `None` if `map` is not chunked here.
    fn chunk_streamer(&mut self, map: &MapId) -> Option<&mut dyn ChunkStreamer>;

    /// Fully resident layout of a monolithic map.
    fn static_map(&self, map: &MapId) -> Option<&dyn MapOracle>;
}
