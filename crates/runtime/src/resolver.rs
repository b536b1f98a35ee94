//! Fast-travel destination resolver.
//!
//! [`FastTravelResolver::travel_to`] walks the [`TravelPhase`] pipeline once:
//! make the destination region resident, return to the home map if needed,
//! ring-search for a landing tile, move the traveler, and notify observers.
//! Nothing is mutated before the search has produced a landing tile, so every
//! failure leaves the traveler where it was.
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use travel_core::{
    ActiveTerrain, CatalogError, ErrorSeverity, GameError, LocationCatalog, LocationId, MapContext,
    MapId, Position, RelocationResult, RingSearch, SearchOutcome, TerrainSource, TravelConfig,
    TravelPhase, Traveler,
};

use crate::events::{EventBus, MapEvent, TravelEvent};
use crate::transition::{MapTransitions, TransitionError, TransitionRequest};

/// Errors raised by a single fast travel. None of them leave partial state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TravelError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("map transition failed: {0}")]
    Transition(#[from] TransitionError),

    #[error("no terrain registered for map '{0}'")]
    MapUnavailable(MapId),
}

impl TravelError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TravelError::Catalog(CatalogError::NotFound(_)))
    }
}

impl GameError for TravelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TravelError::Catalog(err) => err.severity(),
            TravelError::Transition(err) => err.severity(),
            TravelError::MapUnavailable(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TravelError::Catalog(err) => err.error_code(),
            TravelError::Transition(err) => err.error_code(),
            TravelError::MapUnavailable(_) => "TRAVEL_MAP_UNAVAILABLE",
        }
    }
}

/// Mutable world state a travel operates on, borrowed for one call.
pub struct TravelSession<'a> {
    pub catalog: &'a LocationCatalog,
    pub terrain: &'a mut dyn TerrainSource,
    pub traveler: &'a mut Traveler,
}

/// Orchestrates fast travel to previously visited locations.
#[derive(Clone)]
pub struct FastTravelResolver {
    home_map: MapId,
    search: RingSearch,
    transitions: Arc<dyn MapTransitions>,
    events: EventBus,
}

impl FastTravelResolver {
    pub fn new(
        config: &TravelConfig,
        transitions: Arc<dyn MapTransitions>,
        events: EventBus,
    ) -> Self {
        Self {
            home_map: config.home_map.clone(),
            search: RingSearch::new(config.max_search_radius),
            transitions,
            events,
        }
    }

    pub fn home_map(&self) -> &MapId {
        &self.home_map
    }

    pub fn transitions(&self) -> &Arc<dyn MapTransitions> {
        &self.transitions
    }

    /// Moves the traveler to the location recorded as `location_id`.
    ///
    /// The only await point is the home-map transition. If that transition
    /// never completes this future never resolves; wrap it in a timeout when a
    /// deadline matters.
    ///
    /// # Errors
    ///
    /// - [`TravelError::Catalog`] with `NotFound` for unknown ids, before any
    ///   chunk or transition command is issued.
    /// - [`TravelError::Transition`] when the home-map transition fails.
    /// - [`TravelError::MapUnavailable`] when the active map has no terrain.
    pub async fn travel_to(
        &self,
        location_id: &LocationId,
        session: TravelSession<'_>,
    ) -> Result<RelocationResult, TravelError> {
        let TravelSession {
            catalog,
            terrain,
            traveler,
        } = session;

        let location = catalog.get(location_id)?;
        let target = location.position();
        let mut phase = TravelPhase::Idle;

        phase = self.advance(phase, location_id);
        let mut context = self.transitions.current_context();
        let mut region_loaded_on = None;
        if context.is_chunked {
            self.ensure_region(terrain, &context.map_id, target)?;
            region_loaded_on = Some(context.map_id.clone());
        }

        phase = self.advance(phase, location_id);
        if !context.is_on(&self.home_map) {
            debug!(
                from = %context.map_id,
                to = %self.home_map,
                "requesting transition to home map"
            );
            let completed = self
                .transitions
                .request_transition(TransitionRequest::home(self.home_map.clone()))
                .await?;
            context = completed.context;

            if context.is_chunked && region_loaded_on.as_ref() != Some(&context.map_id) {
                self.ensure_region(terrain, &context.map_id, target)?;
            }
        }

        phase = self.advance(phase, location_id);
        let outcome = self.search(terrain, &context, target)?;

        phase = self.advance(phase, location_id);
        let previous = traveler.relocate(outcome.position);

        phase = self.advance(phase, location_id);
        let display_name = location.display_name().to_owned();
        self.events.publish(TravelEvent::PositionChanged {
            previous,
            current: outcome.position,
        });
        self.events.publish(TravelEvent::MessageLogged {
            text: format!("Traveled to {}.", display_name),
        });

        if outcome.is_degraded() {
            warn!(
                location = %location_id,
                target = %target,
                max_radius = self.search.max_radius(),
                "no walkable tile near destination; landed on raw target"
            );
        }

        self.advance(phase, location_id);
        info!(
            location = %location_id,
            from = %previous,
            to = %outcome.position,
            probes = outcome.probes,
            "fast travel completed"
        );

        Ok(RelocationResult {
            location_id: location_id.clone(),
            display_name,
            previous_position: previous,
            final_position: outcome.position,
            search_radius: outcome.radius,
            degraded: outcome.is_degraded(),
        })
    }

    fn advance(&self, phase: TravelPhase, location_id: &LocationId) -> TravelPhase {
        let next = phase.next();
        debug!(location = %location_id, "travel phase {} -> {}", phase, next);
        next
    }

    pub(crate) fn ensure_region(
        &self,
        terrain: &mut dyn TerrainSource,
        map: &MapId,
        target: Position,
    ) -> Result<(), TravelError> {
        let chunks = terrain
            .chunk_streamer(map)
            .ok_or_else(|| TravelError::MapUnavailable(map.clone()))?;
        let load = chunks.ensure_active_region(target, self.search.max_radius());

        if !load.is_noop() {
            debug!(
                map = %map,
                center = %load.center,
                loaded = load.loaded.len(),
                unloaded = load.unloaded.len(),
                "active region changed"
            );
            self.events.publish(MapEvent::RegionLoaded {
                map: map.clone(),
                center: load.center,
                loaded: load.loaded.len(),
                unloaded: load.unloaded.len(),
            });
        }
        Ok(())
    }

    fn search(
        &self,
        terrain: &mut dyn TerrainSource,
        context: &MapContext,
        target: Position,
    ) -> Result<SearchOutcome, TravelError> {
        let unavailable = || TravelError::MapUnavailable(context.map_id.clone());

        let outcome = if context.is_chunked {
            let chunks = terrain.chunk_streamer(&context.map_id).ok_or_else(unavailable)?;
            let oracle = ActiveTerrain::chunked(&*chunks);
            self.search.find_walkable(target, &oracle)
        } else {
            let map = terrain.static_map(&context.map_id).ok_or_else(unavailable)?;
            let oracle = ActiveTerrain::monolithic(map);
            self.search.find_walkable(target, &oracle)
        };

        debug!(
            target = %target,
            landing = %outcome.position,
            radius = ?outcome.radius,
            probes = outcome.probes,
            "ring search finished"
        );
        Ok(outcome)
    }
}
