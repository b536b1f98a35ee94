//! Data-driven content definitions and loaders.
//!
//! This crate reads the static world description from RON/TOML data files:
//! - Visited-location catalog seed (RON)
//! - Overworld layout streamed in chunks (RON)
//! - Static map layouts for dungeons and interiors (RON)
//! - Travel configuration (TOML)
//!
//! Loaders return `travel-core` types or plain data; turning them into
//! runtime terrain backends is the composition root's job.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, LoadResult, MapLoader, OverworldData,
    OverworldLoader,
};
