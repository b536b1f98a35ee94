//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{MapEvent, TravelEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Traveler movement and travel log lines (single channel, so their
    /// relative order is preserved for subscribers)
    Travel,
    /// Map transitions and chunk streaming
    Map,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Travel(TravelEvent),
    Map(MapEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Travel(_) => Topic::Travel,
            Event::Map(_) => Topic::Map,
        }
    }
}

impl From<TravelEvent> for Event {
    fn from(event: TravelEvent) -> Self {
        Event::Travel(event)
    }
}

impl From<MapEvent> for Event {
    fn from(event: MapEvent) -> Self {
        Event::Map(event)
    }
}

struct Channels {
    travel: broadcast::Sender<Event>,
    map: broadcast::Sender<Event>,
}

/// Topic-based event bus
///
/// Publishing is fire-and-forget: events sent while nobody is subscribed to
/// the topic are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                travel: broadcast::channel(capacity).0,
                map: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Travel => &self.channels.travel,
            Topic::Map => &self.channels.map,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
