//! Mutable session state touched by fast travel.
//!
//! The traveler and the map context are the only pieces of world state the
//! resolver reads or writes; everything else is served by oracles.
mod common;
mod traveler;

pub use common::{MapId, Position};
pub use traveler::{DungeonContext, DungeonKind, MapContext, Traveler};
