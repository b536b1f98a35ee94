//! Deterministic fast-travel domain shared by the runtime and content tools.
//!
//! `travel-core` defines the location catalog, terrain oracles, and the
//! Chebyshev ring search used to pick a landing tile. Everything here is
//! synchronous and free of I/O; orchestration (map transitions, events,
//! workers) lives in the runtime crate.
pub mod catalog;
pub mod config;
pub mod env;
pub mod error;
pub mod search;
pub mod state;
pub mod travel;

pub use catalog::{CatalogError, LocationCatalog, LocationId, LocationKind, VisitedLocation};
pub use config::TravelConfig;
pub use env::{
    ActiveTerrain, CHUNK_AREA, CHUNK_SIZE, ChunkCoord, ChunkStreamer, ChunkedWalkability,
    MapDimensions, MapOracle, MonolithicWalkability, RegionLoad, StaticTile, TerrainKind,
    TerrainSource, WalkabilityOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use search::{RingSearch, SearchOutcome, find_walkable, ring_perimeter};
pub use state::{DungeonContext, DungeonKind, MapContext, MapId, Position, Traveler};
pub use travel::{RelocationResult, TravelPhase};
