//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Traveler movement and travel log lines share one
//! topic so subscribers observe them in publication order.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{MapEvent, TravelEvent};
