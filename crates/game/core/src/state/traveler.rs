use strum::{Display, EnumIter};

use super::{MapId, Position};

/// The entity moved by fast travel (the player party).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Traveler {
    position: Position,
}

impl Traveler {
    pub const fn new(position: Position) -> Self {
        Self { position }
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    /// Moves the traveler and returns where it stood before.
    ///
    /// This is the only write path for the position, so observers either see
    /// the old coordinate or the new one, never a mix.
    pub fn relocate(&mut self, destination: Position) -> Position {
        std::mem::replace(&mut self.position, destination)
    }
}

/// Flavour of dungeon the traveler may be exploring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DungeonKind {
    Crypt,
    Cave,
    Ruins,
    Tower,
}

/// Dungeon-specific bookkeeping attached to the active map.
///
/// Both fields are `None` while the traveler is outside a dungeon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonContext {
    pub floor: Option<u32>,
    pub kind: Option<DungeonKind>,
}

impl DungeonContext {
    pub const fn new(floor: u32, kind: DungeonKind) -> Self {
        Self {
            floor: Some(floor),
            kind: Some(kind),
        }
    }

    pub const fn is_inside(&self) -> bool {
        self.floor.is_some() || self.kind.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Describes the map the traveler currently occupies.
///
/// Owned by the map-transition subsystem; everything else only reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapContext {
    pub map_id: MapId,
    pub is_chunked: bool,
    pub dungeon: DungeonContext,
}

impl MapContext {
    pub fn new(map_id: impl Into<MapId>, is_chunked: bool) -> Self {
        Self {
            map_id: map_id.into(),
            is_chunked,
            dungeon: DungeonContext::default(),
        }
    }

    pub fn with_dungeon(mut self, dungeon: DungeonContext) -> Self {
        self.dungeon = dungeon;
        self
    }

    pub fn is_on(&self, map: &MapId) -> bool {
        &self.map_id == map
    }
}
