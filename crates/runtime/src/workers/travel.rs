//! Travel worker that owns the authoritative catalog, terrain and traveler.
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs fast
//! travel through the [`FastTravelResolver`], and publishes events to the
//! EventBus. Commands are handled strictly one after another, so at most one
//! travel is ever in flight.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use travel_core::{
    LocationCatalog, LocationId, MapContext, MapId, Position, RelocationResult, TerrainKind,
    Traveler, VisitedLocation,
};

use crate::api::Result;
use crate::events::{EventBus, TravelEvent};
use crate::oracle::MapStore;
use crate::repository::CatalogRepository;
use crate::resolver::{FastTravelResolver, TravelError, TravelSession};
use crate::transition::TransitionRequest;

/// Commands that can be sent to the travel worker
pub enum Command {
    /// Fast travel to a visited location.
    TravelTo {
        location_id: LocationId,
        reply: oneshot::Sender<Result<RelocationResult>>,
    },
    /// Record a newly discovered location and persist the catalog.
    RecordVisit {
        location: VisitedLocation,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Clone of the whole catalog (read-only).
    QueryCatalog {
        reply: oneshot::Sender<LocationCatalog>,
    },
    QueryLocation {
        location_id: LocationId,
        reply: oneshot::Sender<Result<VisitedLocation>>,
    },
    QueryTraveler { reply: oneshot::Sender<Traveler> },
    /// Transition to another map and place the traveler at `arrival`.
    EnterMap {
        request: TransitionRequest,
        arrival: Position,
        reply: oneshot::Sender<Result<MapContext>>,
    },
    AlterTerrain {
        map: MapId,
        position: Position,
        terrain: TerrainKind,
        reply: oneshot::Sender<bool>,
    },
}

/// Background task that processes travel commands.
pub struct TravelWorker {
    catalog: LocationCatalog,
    maps: MapStore,
    traveler: Traveler,
    resolver: FastTravelResolver,
    repository: Option<Arc<dyn CatalogRepository>>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl TravelWorker {
    pub fn new(
        catalog: LocationCatalog,
        maps: MapStore,
        traveler: Traveler,
        resolver: FastTravelResolver,
        repository: Option<Arc<dyn CatalogRepository>>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            "TravelWorker initialized with {} visited locations at {}",
            catalog.len(),
            traveler.position()
        );

        Self {
            catalog,
            maps,
            traveler,
            resolver,
            repository,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        debug!("TravelWorker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::TravelTo { location_id, reply } => {
                let result = self.handle_travel(&location_id).await;
                if reply.send(result).is_err() {
                    debug!("TravelTo reply channel closed (caller dropped)");
                }
            }
            Command::RecordVisit { location, reply } => {
                let result = self.handle_record_visit(location);
                if reply.send(result).is_err() {
                    debug!("RecordVisit reply channel closed (caller dropped)");
                }
            }
            Command::QueryCatalog { reply } => {
                if reply.send(self.catalog.clone()).is_err() {
                    debug!("QueryCatalog reply channel closed (caller dropped)");
                }
            }
            Command::QueryLocation { location_id, reply } => {
                let result: Result<VisitedLocation> = self
                    .catalog
                    .get(&location_id)
                    .cloned()
                    .map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!("QueryLocation reply channel closed (caller dropped)");
                }
            }
            Command::QueryTraveler { reply } => {
                if reply.send(self.traveler).is_err() {
                    debug!("QueryTraveler reply channel closed (caller dropped)");
                }
            }
            Command::EnterMap {
                request,
                arrival,
                reply,
            } => {
                let result = self.handle_enter_map(request, arrival).await;
                if reply.send(result).is_err() {
                    debug!("EnterMap reply channel closed (caller dropped)");
                }
            }
            Command::AlterTerrain {
                map,
                position,
                terrain,
                reply,
            } => {
                let applied = self.maps.set_terrain(&map, position, terrain);
                debug!(map = %map, position = %position, ?terrain, applied, "terrain altered");
                if reply.send(applied).is_err() {
                    debug!("AlterTerrain reply channel closed (caller dropped)");
                }
            }
        }
    }

    async fn handle_travel(&mut self, location_id: &LocationId) -> Result<RelocationResult> {
        let session = TravelSession {
            catalog: &self.catalog,
            terrain: &mut self.maps,
            traveler: &mut self.traveler,
        };

        Ok(self.resolver.travel_to(location_id, session).await?)
    }

    /// Appends to a copy of the catalog and only commits it once the
    /// repository has accepted the save.
    fn handle_record_visit(&mut self, location: VisitedLocation) -> Result<()> {
        let mut updated = self.catalog.clone();
        updated.record(location)?;

        if let Some(repository) = &self.repository {
            repository.save(&updated)?;
        }

        self.catalog = updated;
        info!("Catalog now holds {} visited locations", self.catalog.len());
        Ok(())
    }

    async fn handle_enter_map(
        &mut self,
        request: TransitionRequest,
        arrival: Position,
    ) -> Result<MapContext> {
        // The map context must never move without the traveler.
        if !self.maps.contains(&request.target) {
            return Err(TravelError::MapUnavailable(request.target).into());
        }

        let completed = self
            .resolver
            .transitions()
            .request_transition(request)
            .await?;
        let context = completed.context;

        if context.is_chunked {
            self.resolver
                .ensure_region(&mut self.maps, &context.map_id, arrival)?;
        }

        let previous = self.traveler.relocate(arrival);
        self.event_bus.publish(TravelEvent::PositionChanged {
            previous,
            current: arrival,
        });

        Ok(context)
    }
}
