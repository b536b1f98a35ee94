//! High-level runtime orchestrator.
//!
//! The runtime owns the background workers, wires up command/event channels,
//! and exposes a builder-based API for clients to drive fast travel.

use std::env;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use travel_core::{DungeonContext, LocationCatalog, MapContext, MapId, Traveler, TravelConfig};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::MapStore;
use crate::repository::CatalogRepository;
use crate::resolver::FastTravelResolver;
use crate::transition::{MapTransitions, TransitionError, TransitionWorker};
use crate::workers::{Command, TravelWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub travel: TravelConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub transition_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            travel: TravelConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            transition_buffer_size: 8,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `FAST_TRAVEL_MAX_RADIUS` - Rings scanned around a destination (default: 9)
    /// - `FAST_TRAVEL_HOME_MAP` - Map fast travel returns to (default: overworld)
    /// - `FAST_TRAVEL_REGION_RADIUS` - Chunks kept loaded per direction (default: 1)
    /// - `RUNTIME_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `RUNTIME_COMMAND_BUFFER` - Travel worker queue size (default: 32)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies the `from_env` variables on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides using `lookup` in place of the process environment.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(radius) = read_var::<u32>(&lookup, "FAST_TRAVEL_MAX_RADIUS") {
            self.travel.max_search_radius = radius;
        }
        if let Some(home) = lookup("FAST_TRAVEL_HOME_MAP")
            && !home.trim().is_empty()
        {
            self.travel.home_map = MapId::new(home.trim());
        }
        if let Some(radius) = read_var::<u32>(&lookup, "FAST_TRAVEL_REGION_RADIUS") {
            self.travel.active_region_radius = radius;
        }
        if let Some(capacity) = read_var::<usize>(&lookup, "RUNTIME_EVENT_BUFFER") {
            self.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_var::<usize>(&lookup, "RUNTIME_COMMAND_BUFFER") {
            self.command_buffer_size = capacity.max(1);
        }
        self
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

/// Main runtime that orchestrates fast travel.
///
/// Runtime owns the workers; [`RuntimeHandle`] is the cloneable façade for
/// clients.
pub struct Runtime {
    handle: RuntimeHandle,
    travel_worker_handle: JoinHandle<()>,
    transition_worker_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// Workers exit once every handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.travel_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        if let Some(transition_handle) = self.transition_worker_handle {
            transition_handle.await.map_err(RuntimeError::WorkerJoin)?;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: LocationCatalog,
    maps: MapStore,
    start_map: Option<MapId>,
    start_dungeon: DungeonContext,
    traveler: Traveler,
    repository: Option<Arc<dyn CatalogRepository>>,
    transitions: Option<Arc<dyn MapTransitions>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: LocationCatalog::new(),
            maps: MapStore::new(),
            start_map: None,
            start_dungeon: DungeonContext::default(),
            traveler: Traveler::default(),
            repository: None,
            transitions: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial catalog. A catalog found in the repository takes precedence.
    pub fn catalog(mut self, catalog: LocationCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Terrain for every map the traveler can occupy
    pub fn maps(mut self, maps: MapStore) -> Self {
        self.maps = maps;
        self
    }

    /// Map the traveler starts on (default: the configured home map)
    pub fn start_map(mut self, map: impl Into<MapId>) -> Self {
        self.start_map = Some(map.into());
        self
    }

    /// Dungeon context in effect at start
    pub fn start_dungeon(mut self, dungeon: DungeonContext) -> Self {
        self.start_dungeon = dungeon;
        self
    }

    pub fn traveler(mut self, traveler: Traveler) -> Self {
        self.traveler = traveler;
        self
    }

    /// Persist the catalog after every recorded visit
    pub fn repository(mut self, repository: Arc<dyn CatalogRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Use an external map-transition subsystem instead of the built-in worker
    pub fn transitions(mut self, transitions: Arc<dyn MapTransitions>) -> Self {
        self.transitions = Some(transitions);
        self
    }

    /// Build the runtime and spawn its workers
    pub async fn build(self) -> Result<Runtime> {
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let catalog = match &self.repository {
            Some(repository) if repository.exists() => match repository.load()? {
                Some(saved) => {
                    info!("Loaded {} visited locations from repository", saved.len());
                    saved
                }
                None => self.catalog,
            },
            Some(_) => {
                debug!("No saved catalog; starting from the supplied one");
                self.catalog
            }
            None => self.catalog,
        };

        let (transitions, transition_worker_handle) = match self.transitions {
            Some(transitions) => (transitions, None),
            None => {
                let start_map = self
                    .start_map
                    .unwrap_or_else(|| self.config.travel.home_map.clone());
                let descriptor = self
                    .maps
                    .descriptor(&start_map)
                    .ok_or(TransitionError::UnknownMap(start_map))?;
                let initial = MapContext::new(descriptor.map_id, descriptor.is_chunked)
                    .with_dungeon(self.start_dungeon);

                debug!("Spawning transition worker on map {}", initial.map_id);
                let (handle, join) = TransitionWorker::spawn(
                    self.maps.descriptors(),
                    initial,
                    event_bus.clone(),
                    self.config.transition_buffer_size,
                );
                (Arc::new(handle) as Arc<dyn MapTransitions>, Some(join))
            }
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx, Arc::clone(&transitions), event_bus.clone());

        let resolver =
            FastTravelResolver::new(&self.config.travel, transitions, event_bus.clone());
        let travel_worker = TravelWorker::new(
            catalog,
            self.maps,
            self.traveler,
            resolver,
            self.repository,
            command_rx,
            event_bus,
        );

        let travel_worker_handle = tokio::spawn(async move {
            travel_worker.run().await;
        });

        Ok(Runtime {
            handle,
            travel_worker_handle,
            transition_worker_handle,
        })
    }
}
