//! Static map layouts served through [`travel_core::MapOracle`].
use std::collections::HashMap;

use travel_core::{MapDimensions, MapOracle, Position, StaticTile, TerrainKind};

/// MapOracle implementation for fully resident maps (dungeon floors, interiors).
///
/// Positions without an explicit tile are treated as absent and therefore
/// never walkable.
#[derive(Clone, Debug)]
pub struct MapOracleImpl {
    dimensions: MapDimensions,
    tiles: HashMap<Position, StaticTile>,
}

impl MapOracleImpl {
    pub fn new(dimensions: MapDimensions, tiles: HashMap<Position, StaticTile>) -> Self {
        Self { dimensions, tiles }
    }

    /// Creates a map filled with a single terrain.
    pub fn filled(width: u32, height: u32, terrain: TerrainKind) -> Self {
        let dimensions = MapDimensions::new(width, height);
        let tiles = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .map(|position| (position, StaticTile::new(terrain)))
            .collect();

        Self::new(dimensions, tiles)
    }

    /// Builds a map from ASCII rows; row 0 is `y = 0`.
    ///
    /// `.` floor, `,` grass, `=` road, `:` sand, `#` wall, `~` water, anything
    /// else void. Width is the longest row.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let dimensions = MapDimensions::new(
            u32::try_from(width).unwrap_or(u32::MAX),
            u32::try_from(rows.len()).unwrap_or(u32::MAX),
        );

        let mut tiles = HashMap::new();
        for (y, row) in (0i32..).zip(rows) {
            for (x, glyph) in (0i32..).zip(row.chars()) {
                tiles.insert(Position::new(x, y), StaticTile::new(terrain_for_glyph(glyph)));
            }
        }

        Self::new(dimensions, tiles)
    }

    /// Replaces the terrain at `position`. Returns `false` for out-of-bounds positions.
    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> bool {
        if !self.dimensions.contains(position) {
            return false;
        }
        self.tiles.insert(position, StaticTile::new(terrain));
        true
    }
}

fn terrain_for_glyph(glyph: char) -> TerrainKind {
    match glyph {
        '.' => TerrainKind::Floor,
        ',' => TerrainKind::Grass,
        '=' => TerrainKind::Road,
        ':' => TerrainKind::Sand,
        '#' => TerrainKind::Wall,
        '~' => TerrainKind::Water,
        _ => TerrainKind::Void,
    }
}

impl MapOracle for MapOracleImpl {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.tiles.get(&position).copied()
    }
}
