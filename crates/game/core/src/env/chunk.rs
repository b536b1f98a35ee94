use std::fmt;

use super::StaticTile;
use crate::state::Position;

/// Side length of a square chunk, in tiles.
pub const CHUNK_SIZE: i32 = 16;

/// Number of tiles held by one chunk.
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Chunk-grid coordinate (one unit = [`CHUNK_SIZE`] tiles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk holding `position`. Negative coordinates round toward negative infinity.
    pub const fn containing(position: Position) -> Self {
        Self {
            x: position.x.div_euclid(CHUNK_SIZE),
            y: position.y.div_euclid(CHUNK_SIZE),
        }
    }

    /// World position of this chunk's lower-left tile.
    pub const fn origin(self) -> Position {
        Position::new(
            self.x.saturating_mul(CHUNK_SIZE),
            self.y.saturating_mul(CHUNK_SIZE),
        )
    }

    /// Row-major index of `position` inside whichever chunk contains it.
    pub const fn local_index(position: Position) -> usize {
        let local_x = position.x.rem_euclid(CHUNK_SIZE);
        let local_y = position.y.rem_euclid(CHUNK_SIZE);
        (local_y * CHUNK_SIZE + local_x) as usize
    }

    pub fn chebyshev_distance(self, other: ChunkCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Square of chunks within `radius` of this one, row-major, self included.
    pub fn neighbourhood(self, radius: u32) -> impl Iterator<Item = ChunkCoord> {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        (-r..=r).flat_map(move |dy| {
            (-r..=r).map(move |dx| {
                ChunkCoord::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
            })
        })
    }

    /// Every chunk touched by the tile square `center ± reach`, row-major.
    pub fn covering(center: Position, reach: u32) -> impl Iterator<Item = ChunkCoord> {
        let r = i32::try_from(reach).unwrap_or(i32::MAX);
        let min = ChunkCoord::containing(center.offset(-r, -r));
        let max = ChunkCoord::containing(center.offset(r, r));
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| ChunkCoord::new(x, y)))
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk[{}, {}]", self.x, self.y)
    }
}

/// Confirmation returned by [`ChunkStreamer::ensure_active_region`].
///
/// Once this value exists every chunk of the region is resident.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionLoad {
    pub center: ChunkCoord,
    pub loaded: Vec<ChunkCoord>,
    pub unloaded: Vec<ChunkCoord>,
}

impl RegionLoad {
    /// True when the region was already active and nothing changed.
    pub fn is_noop(&self) -> bool {
        self.loaded.is_empty() && self.unloaded.is_empty()
    }
}

/// Chunk subsystem of a streamed (chunk-based) map.
///
/// Tile queries are only meaningful for loaded chunks; callers must make the
/// region active before trusting them.
pub trait ChunkStreamer: Send + Sync {
    /// Loads the active region around `center` synchronously.
    ///
    /// The resident set must include every chunk touched by the tiles within
    /// `reach` (Chebyshev) of `center`, on top of whatever the streamer keeps
    /// around the center on its own.
    fn ensure_active_region(&mut self, center: Position, reach: u32) -> RegionLoad;

    fn is_chunk_loaded(&self, chunk: ChunkCoord) -> bool;

    /// Tile at `position`, or `None` if its chunk is not loaded or the tile is absent.
    fn tile_at(&self, position: Position) -> Option<StaticTile>;
}
