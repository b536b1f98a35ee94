//! Fast-travel resolver against recording fakes.
//!
//! The fakes log every transition request, region load and walkability query
//! into one shared list so tests can assert on the order of side effects.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use travel_core::{
    ChunkCoord, ChunkStreamer, DungeonContext, DungeonKind, LocationCatalog, LocationId,
    MapContext, MapDimensions, MapId, MapOracle, Position, RegionLoad, StaticTile, TerrainKind,
    TerrainSource, TravelConfig, Traveler, VisitedLocation,
};
use travel_runtime::{
    ChunkedWorld, DungeonUpdate, Event, EventBus, FastTravelResolver, MapOracleImpl,
    MapTransitions, OverworldLayout, Topic, TransitionCompleted, TransitionError,
    TransitionRequest, TravelError, TravelEvent, TravelSession,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Transition(TransitionRequest),
    RegionLoad(MapId),
    Query(MapId),
}

type CallLog = Arc<Mutex<Vec<Call>>>;

fn push(log: &CallLog, call: Call) {
    log.lock().expect("call log poisoned").push(call);
}

fn calls(log: &CallLog) -> Vec<Call> {
    log.lock().expect("call log poisoned").clone()
}

struct LoggedChunks {
    map: MapId,
    world: ChunkedWorld,
    log: CallLog,
}

impl ChunkStreamer for LoggedChunks {
    fn ensure_active_region(&mut self, center: Position, reach: u32) -> RegionLoad {
        push(&self.log, Call::RegionLoad(self.map.clone()));
        self.world.ensure_active_region(center, reach)
    }

    fn is_chunk_loaded(&self, chunk: ChunkCoord) -> bool {
        push(&self.log, Call::Query(self.map.clone()));
        self.world.is_chunk_loaded(chunk)
    }

    fn tile_at(&self, position: Position) -> Option<StaticTile> {
        self.world.tile_at(position)
    }
}

struct LoggedMap {
    map: MapId,
    layout: MapOracleImpl,
    log: CallLog,
}

impl MapOracle for LoggedMap {
    fn dimensions(&self) -> MapDimensions {
        self.layout.dimensions()
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        push(&self.log, Call::Query(self.map.clone()));
        self.layout.tile(position)
    }
}

struct FakeTerrain {
    overworld: LoggedChunks,
    crypt: LoggedMap,
}

impl TerrainSource for FakeTerrain {
    fn chunk_streamer(&mut self, map: &MapId) -> Option<&mut dyn ChunkStreamer> {
        if &self.overworld.map == map {
            Some(&mut self.overworld)
        } else {
            None
        }
    }

    fn static_map(&self, map: &MapId) -> Option<&dyn MapOracle> {
        if &self.crypt.map == map {
            Some(&self.crypt)
        } else {
            None
        }
    }
}

struct FakeTransitions {
    context: Mutex<MapContext>,
    chunked: HashMap<MapId, bool>,
    log: CallLog,
}

#[async_trait]
impl MapTransitions for FakeTransitions {
    fn current_context(&self) -> MapContext {
        self.context.lock().expect("context poisoned").clone()
    }

    async fn request_transition(
        &self,
        request: TransitionRequest,
    ) -> Result<TransitionCompleted, TransitionError> {
        push(&self.log, Call::Transition(request.clone()));

        let is_chunked = *self
            .chunked
            .get(&request.target)
            .ok_or_else(|| TransitionError::UnknownMap(request.target.clone()))?;

        let mut current = self.context.lock().expect("context poisoned");
        let dungeon = request.dungeon.apply(current.dungeon);
        *current = MapContext::new(request.target.clone(), is_chunked).with_dungeon(dungeon);

        Ok(TransitionCompleted {
            context: current.clone(),
        })
    }
}

/// Never completes a transition.
struct StalledTransitions {
    context: MapContext,
}

#[async_trait]
impl MapTransitions for StalledTransitions {
    fn current_context(&self) -> MapContext {
        self.context.clone()
    }

    async fn request_transition(
        &self,
        _request: TransitionRequest,
    ) -> Result<TransitionCompleted, TransitionError> {
        std::future::pending().await
    }
}

const CRYPT: &str = "crypt-1";

struct Fixture {
    log: CallLog,
    catalog: LocationCatalog,
    terrain: FakeTerrain,
    traveler: Traveler,
    transitions: Arc<FakeTransitions>,
    events: EventBus,
}

impl Fixture {
    fn new(walls: impl IntoIterator<Item = Position>) -> Self {
        Self::starting_on(MapContext::new(MapId::overworld(), true), walls)
    }

    fn starting_on(context: MapContext, walls: impl IntoIterator<Item = Position>) -> Self {
        let log = CallLog::default();

        let mut catalog = LocationCatalog::new();
        catalog
            .record(VisitedLocation::town("oakvale", "Oakvale", Position::new(10, 10)))
            .expect("unique id");
        catalog
            .record(VisitedLocation::dungeon(
                "sunken-crypt",
                "Sunken Crypt",
                Position::new(-40, 12),
            ))
            .expect("unique id");

        let layout = OverworldLayout::new(TerrainKind::Grass).with_tiles(
            walls
                .into_iter()
                .map(|position| (position, StaticTile::new(TerrainKind::Wall))),
        );

        let terrain = FakeTerrain {
            overworld: LoggedChunks {
                map: MapId::overworld(),
                world: ChunkedWorld::new(layout, 1),
                log: Arc::clone(&log),
            },
            crypt: LoggedMap {
                map: MapId::new(CRYPT),
                layout: MapOracleImpl::filled(12, 12, TerrainKind::Floor),
                log: Arc::clone(&log),
            },
        };

        let transitions = Arc::new(FakeTransitions {
            context: Mutex::new(context),
            chunked: HashMap::from([(MapId::overworld(), true), (MapId::new(CRYPT), false)]),
            log: Arc::clone(&log),
        });

        Self {
            log,
            catalog,
            terrain,
            traveler: Traveler::new(Position::new(3, 3)),
            transitions,
            events: EventBus::new(),
        }
    }

    /// Replaces the overworld with `open` walkable tiles in a sea of walls.
    fn walled_overworld(&mut self, active_radius: u32, open: &[Position]) {
        let layout = OverworldLayout::new(TerrainKind::Wall).with_tiles(
            open.iter()
                .map(|position| (*position, StaticTile::new(TerrainKind::Grass))),
        );
        self.terrain.overworld.world = ChunkedWorld::new(layout, active_radius);
    }

    fn record_town(&mut self, id: &str, position: Position) {
        self.catalog
            .record(VisitedLocation::town(id, id, position))
            .expect("unique id");
    }

    async fn travel(&mut self, id: &str) -> Result<travel_core::RelocationResult, TravelError> {
        self.travel_with(&TravelConfig::default(), id).await
    }

    async fn travel_with(
        &mut self,
        config: &TravelConfig,
        id: &str,
    ) -> Result<travel_core::RelocationResult, TravelError> {
        let resolver = FastTravelResolver::new(
            config,
            Arc::clone(&self.transitions) as Arc<dyn MapTransitions>,
            self.events.clone(),
        );
        let session = TravelSession {
            catalog: &self.catalog,
            terrain: &mut self.terrain,
            traveler: &mut self.traveler,
        };
        resolver.travel_to(&LocationId::new(id), session).await
    }
}

/// Walls on every ring-1 cell that comes before (11, 10) in scan order, plus
/// the target itself.
fn walls_leaving_east_neighbour_open() -> Vec<Position> {
    vec![
        Position::new(10, 10),
        Position::new(9, 9),
        Position::new(10, 9),
        Position::new(11, 9),
        Position::new(9, 10),
    ]
}

#[tokio::test]
async fn walkable_destination_lands_exactly_on_target() {
    let mut fixture = Fixture::new([]);

    let result = fixture.travel("oakvale").await.expect("travel succeeds");

    assert_eq!(result.final_position, Position::new(10, 10));
    assert_eq!(result.previous_position, Position::new(3, 3));
    assert_eq!(result.display_name, "Oakvale");
    assert_eq!(result.search_radius, Some(0));
    assert!(!result.degraded);
    assert_eq!(fixture.traveler.position(), Position::new(10, 10));
}

#[tokio::test]
async fn blocked_destination_lands_on_nearest_walkable_tile() {
    let mut fixture = Fixture::new(walls_leaving_east_neighbour_open());

    let result = fixture.travel("oakvale").await.expect("travel succeeds");

    assert_eq!(result.final_position, Position::new(11, 10));
    assert_eq!(result.search_radius, Some(1));
    assert!(!result.degraded);
}

#[tokio::test]
async fn exhausted_search_falls_back_to_target_and_flags_degraded() {
    let walls = (1..=19).flat_map(|y| (1..=19).map(move |x| Position::new(x, y)));
    let mut fixture = Fixture::new(walls);

    let result = fixture.travel("oakvale").await.expect("travel succeeds");

    assert_eq!(result.final_position, Position::new(10, 10));
    assert_eq!(result.search_radius, None);
    assert!(result.degraded);
    assert_eq!(fixture.traveler.position(), Position::new(10, 10));
}

#[tokio::test]
async fn search_reaches_across_a_chunk_edge() {
    let mut fixture = Fixture::new([]);
    fixture.walled_overworld(0, &[Position::new(16, 15)]);
    fixture.record_town("ferry-landing", Position::new(15, 15));

    let result = fixture.travel("ferry-landing").await.expect("travel succeeds");

    assert_eq!(result.final_position, Position::new(16, 15));
    assert_eq!(result.search_radius, Some(1));
    assert!(!result.degraded);
}

#[tokio::test]
async fn wide_search_loads_every_chunk_it_scans() {
    let mut fixture = Fixture::new([]);
    fixture.walled_overworld(0, &[Position::new(8, 27)]);
    fixture.record_town("hollow", Position::new(8, 8));
    let config = TravelConfig {
        max_search_radius: 19,
        ..TravelConfig::default()
    };

    let result = fixture
        .travel_with(&config, "hollow")
        .await
        .expect("travel succeeds");

    assert_eq!(result.final_position, Position::new(8, 27));
    assert_eq!(result.search_radius, Some(19));
    assert!(fixture.terrain.overworld.world.is_chunk_loaded(ChunkCoord::new(0, 1)));
}

#[tokio::test]
async fn region_is_loaded_before_any_walkability_query() {
    let mut fixture = Fixture::new([]);

    fixture.travel("oakvale").await.expect("travel succeeds");

    let log = calls(&fixture.log);
    assert_eq!(log.first(), Some(&Call::RegionLoad(MapId::overworld())));
    assert!(log.iter().skip(1).all(|call| matches!(call, Call::Query(_))));
    assert!(!log.iter().any(|call| matches!(call, Call::Transition(_))));
}

#[tokio::test]
async fn dungeon_travel_returns_home_with_reset_before_querying() {
    let start = MapContext::new(CRYPT, false)
        .with_dungeon(DungeonContext::new(4, DungeonKind::Crypt));
    let mut fixture = Fixture::starting_on(start, []);
    fixture.traveler = Traveler::new(Position::new(5, 5));

    let result = fixture.travel("oakvale").await.expect("travel succeeds");
    assert_eq!(result.final_position, Position::new(10, 10));

    let log = calls(&fixture.log);
    let transitions: Vec<_> = log
        .iter()
        .filter_map(|call| match call {
            Call::Transition(request) => Some(request.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![TransitionRequest {
            target: MapId::overworld(),
            dungeon: DungeonUpdate::Reset,
        }]
    );

    let first_transition = log
        .iter()
        .position(|call| matches!(call, Call::Transition(_)))
        .expect("transition requested");
    let first_query = log
        .iter()
        .position(|call| matches!(call, Call::Query(_)))
        .expect("walkability queried");
    assert!(first_transition < first_query);
    assert!(!log.contains(&Call::Query(MapId::new(CRYPT))));
    assert_eq!(
        log.get(first_transition + 1),
        Some(&Call::RegionLoad(MapId::overworld()))
    );

    let context = fixture.transitions.current_context();
    assert_eq!(context.map_id, MapId::overworld());
    assert_eq!(context.dungeon, DungeonContext::default());
}

#[tokio::test]
async fn unknown_location_fails_without_side_effects() {
    let start = MapContext::new(CRYPT, false)
        .with_dungeon(DungeonContext::new(2, DungeonKind::Cave));
    let mut fixture = Fixture::starting_on(start.clone(), []);
    let mut travel_rx = fixture.events.subscribe(Topic::Travel);
    let catalog_before = fixture.catalog.clone();

    let err = fixture.travel("atlantis").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(fixture.traveler.position(), Position::new(3, 3));
    assert_eq!(fixture.catalog, catalog_before);
    assert!(calls(&fixture.log).is_empty());
    assert_eq!(fixture.transitions.current_context(), start);
    assert!(travel_rx.try_recv().is_err());
}

#[tokio::test]
async fn position_change_is_published_before_log_message_exactly_once() {
    let mut fixture = Fixture::new([]);
    let mut travel_rx = fixture.events.subscribe(Topic::Travel);

    fixture.travel("oakvale").await.expect("travel succeeds");

    assert_eq!(
        travel_rx.recv().await.expect("position event"),
        Event::Travel(TravelEvent::PositionChanged {
            previous: Position::new(3, 3),
            current: Position::new(10, 10),
        })
    );
    assert_eq!(
        travel_rx.recv().await.expect("message event"),
        Event::Travel(TravelEvent::MessageLogged {
            text: "Traveled to Oakvale.".to_string(),
        })
    );
    assert!(travel_rx.try_recv().is_err());
}

#[tokio::test]
async fn stalled_transition_leaves_traveler_in_place() {
    let mut fixture = Fixture::new([]);
    let stalled = Arc::new(StalledTransitions {
        context: MapContext::new(CRYPT, false),
    });
    let resolver = FastTravelResolver::new(
        &TravelConfig::default(),
        stalled as Arc<dyn MapTransitions>,
        fixture.events.clone(),
    );

    let session = TravelSession {
        catalog: &fixture.catalog,
        terrain: &mut fixture.terrain,
        traveler: &mut fixture.traveler,
    };
    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        resolver.travel_to(&LocationId::new("oakvale"), session),
    )
    .await;

    assert!(outcome.is_err(), "travel must still be waiting on the transition");
    assert_eq!(fixture.traveler.position(), Position::new(3, 3));
    assert!(calls(&fixture.log).is_empty());
}

#[tokio::test]
async fn failed_transition_surfaces_before_relocation() {
    let mut fixture = Fixture::starting_on(MapContext::new(CRYPT, false), []);
    fixture.transitions = Arc::new(FakeTransitions {
        context: Mutex::new(MapContext::new(CRYPT, false)),
        chunked: HashMap::new(),
        log: Arc::clone(&fixture.log),
    });

    let err = fixture.travel("oakvale").await.unwrap_err();

    assert_eq!(
        err,
        TravelError::Transition(TransitionError::UnknownMap(MapId::overworld()))
    );
    assert_eq!(fixture.traveler.position(), Position::new(3, 3));
}

#[tokio::test]
async fn zero_radius_only_checks_the_target() {
    let mut fixture = Fixture::new(walls_leaving_east_neighbour_open());
    let config = TravelConfig::default().with_max_search_radius(0);
    let resolver = FastTravelResolver::new(
        &config,
        Arc::clone(&fixture.transitions) as Arc<dyn MapTransitions>,
        fixture.events.clone(),
    );

    let session = TravelSession {
        catalog: &fixture.catalog,
        terrain: &mut fixture.terrain,
        traveler: &mut fixture.traveler,
    };
    let result = resolver
        .travel_to(&LocationId::new("oakvale"), session)
        .await
        .expect("travel succeeds");

    assert!(result.degraded);
    assert_eq!(result.final_position, Position::new(10, 10));
    assert_eq!(resolver.home_map(), &MapId::overworld());
}
