use crate::state::Position;

/// Monolithic map oracle: the whole layout is resident and bounded.
///
/// Dungeon floors and interiors are served this way; the overworld is chunked
/// (see [`ChunkStreamer`](super::ChunkStreamer)).
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// In-bounds, present, and passable. Anything outside the map is not walkable.
    fn is_walkable(&self, position: Position) -> bool {
        self.contains(position) && self.tile(position).is_some_and(StaticTile::is_passable)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && i64::from(position.x) < i64::from(self.width)
            && i64::from(position.y) < i64::from(self.height)
    }

    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Immutable descriptor for a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }
}

impl From<TerrainKind> for StaticTile {
    fn from(terrain: TerrainKind) -> Self {
        Self::new(terrain)
    }
}

/// Canonical terrain classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Road,
    Grass,
    Sand,
    Wall,
    Water,
    Void,
    /// Content-defined terrain; never walkable.
    Custom(u16),
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(
            self,
            TerrainKind::Floor | TerrainKind::Road | TerrainKind::Grass | TerrainKind::Sand
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_contain_only_in_bounds_positions() {
        let dims = MapDimensions::new(4, 3);

        assert!(dims.contains(Position::new(0, 0)));
        assert!(dims.contains(Position::new(3, 2)));
        assert!(!dims.contains(Position::new(4, 2)));
        assert!(!dims.contains(Position::new(3, 3)));
        assert!(!dims.contains(Position::new(-1, 0)));
        assert_eq!(dims.area(), 12);
    }

    #[test]
    fn only_ground_terrain_is_passable() {
        assert!(TerrainKind::Floor.is_passable());
        assert!(TerrainKind::Road.is_passable());
        assert!(TerrainKind::Grass.is_passable());
        assert!(TerrainKind::Sand.is_passable());
        assert!(!TerrainKind::Wall.is_passable());
        assert!(!TerrainKind::Water.is_passable());
        assert!(!TerrainKind::Void.is_passable());
        assert!(!TerrainKind::Custom(7).is_passable());
    }
}
