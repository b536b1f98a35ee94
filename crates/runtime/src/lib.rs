//! Runtime orchestration for fast travel.
//!
//! This crate wires the pure `travel-core` domain into async workers: the
//! [`FastTravelResolver`] pipeline, a map-transition worker, in-memory terrain
//! and catalog repositories. Consumers embed [`Runtime`] and interact with the
//! world through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`resolver`] implements the travel pipeline itself
//! - [`transition`] owns the active map context
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] and [`repository`] provide terrain and persistence adapters
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod resolver;
pub mod runtime;
pub mod transition;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, MapEvent, Topic, TravelEvent};
pub use oracle::{ChunkedWorld, MapDescriptor, MapOracleImpl, MapStore, OverworldLayout};
pub use repository::{
    CatalogRepository, FileCatalogRepository, InMemoryCatalogRepo, RepositoryError,
};
pub use resolver::{FastTravelResolver, TravelError, TravelSession};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use transition::{
    DungeonUpdate, MapTransitions, TransitionCompleted, TransitionError, TransitionHandle,
    TransitionRequest, TransitionWorker,
};
