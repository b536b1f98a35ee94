//! Event types for different topics.

use serde::{Deserialize, Serialize};
use travel_core::{ChunkCoord, MapId, Position};

/// Events about the traveler, in the order observers must see them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelEvent {
    /// The traveler's position was written. Always published before the
    /// matching [`TravelEvent::MessageLogged`].
    PositionChanged {
        previous: Position,
        current: Position,
    },

    /// A line for the player-facing message log.
    MessageLogged { text: String },
}

/// Events from the map subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapEvent {
    /// The active map changed.
    TransitionCompleted {
        from: MapId,
        to: MapId,
        dungeon_reset: bool,
    },

    /// The chunk streamer made a region active.
    RegionLoaded {
        map: MapId,
        center: ChunkCoord,
        loaded: usize,
        unloaded: usize,
    },
}
