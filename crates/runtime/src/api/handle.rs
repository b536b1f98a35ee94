//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for fast
//! travel, catalog queries and event streaming.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};

use travel_core::{
    LocationCatalog, LocationId, LocationKind, MapContext, MapId, Position, RelocationResult,
    TerrainKind, Traveler, VisitedLocation,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::transition::{MapTransitions, TransitionRequest};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    transitions: Arc<dyn MapTransitions>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        transitions: Arc<dyn MapTransitions>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            command_tx,
            transitions,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Fast travel to a previously visited location.
    ///
    /// Waits as long as the map transition takes; see [`Self::travel_to_within`].
    pub async fn travel_to(&self, location_id: impl Into<LocationId>) -> Result<RelocationResult> {
        let location_id = location_id.into();
        self.request(|reply| Command::TravelTo { location_id, reply })
            .await?
    }

    /// Like [`Self::travel_to`], but gives up after `timeout`.
    ///
    /// Expiry yields [`RuntimeError::TransitionStalled`]. The travel worker is
    /// not interrupted; it finishes (or keeps waiting on) the transition and
    /// later commands queue behind it.
    pub async fn travel_to_within(
        &self,
        location_id: impl Into<LocationId>,
        timeout: Duration,
    ) -> Result<RelocationResult> {
        let location_id = location_id.into();

        match tokio::time::timeout(timeout, self.travel_to(location_id.clone())).await {
            Ok(result) => result,
            Err(_) => Err(RuntimeError::TransitionStalled {
                location: location_id,
                timeout,
            }),
        }
    }

    /// Record a newly discovered location (discovery tracker entry point).
    pub async fn record_visit(&self, location: VisitedLocation) -> Result<()> {
        self.request(|reply| Command::RecordVisit { location, reply })
            .await?
    }

    /// Snapshot of the whole catalog.
    pub async fn catalog_snapshot(&self) -> Result<LocationCatalog> {
        self.request(|reply| Command::QueryCatalog { reply }).await
    }

    /// Visited locations of `kind`, in discovery order.
    pub async fn catalog(&self, kind: LocationKind) -> Result<Vec<VisitedLocation>> {
        let catalog = self.catalog_snapshot().await?;
        Ok(catalog.query(kind).cloned().collect())
    }

    pub async fn location(&self, location_id: impl Into<LocationId>) -> Result<VisitedLocation> {
        let location_id = location_id.into();
        self.request(|reply| Command::QueryLocation { location_id, reply })
            .await?
    }

    pub async fn traveler(&self) -> Result<Traveler> {
        self.request(|reply| Command::QueryTraveler { reply }).await
    }

    /// The map the traveler currently occupies. Never blocks on the workers.
    pub fn map_context(&self) -> MapContext {
        self.transitions.current_context()
    }

    /// Move to another map (e.g. down a dungeon staircase), placing the
    /// traveler at `arrival`.
    pub async fn enter_map(
        &self,
        request: TransitionRequest,
        arrival: Position,
    ) -> Result<MapContext> {
        self.request(|reply| Command::EnterMap {
            request,
            arrival,
            reply,
        })
        .await?
    }

    /// Change terrain on a map. Returns `false` if the map or position is
    /// unknown.
    pub async fn alter_terrain(
        &self,
        map: impl Into<MapId>,
        position: Position,
        terrain: TerrainKind,
    ) -> Result<bool> {
        let map = map.into();
        self.request(|reply| Command::AlterTerrain {
            map,
            position,
            terrain,
            reply,
        })
        .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Travel` - Position changes and travel log lines, in order
    /// - `Topic::Map` - Map transitions and chunk region loads
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
