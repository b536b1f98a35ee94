//! Map-transition subsystem.
//!
//! The [`TransitionWorker`] owns the authoritative [`MapContext`]. Everything
//! else reads it through a [`TransitionHandle`] and changes it only by sending
//! a [`TransitionRequest`] and awaiting the reply.
mod types;
mod worker;

use async_trait::async_trait;

use travel_core::MapContext;

pub use types::{DungeonUpdate, TransitionCompleted, TransitionError, TransitionRequest};
pub use worker::{TransitionHandle, TransitionWorker};

/// Capability the resolver uses to observe and change the active map.
#[async_trait]
pub trait MapTransitions: Send + Sync {
    /// Snapshot of the map the traveler currently occupies.
    fn current_context(&self) -> MapContext;

    /// Switch the active map, resolving once the new context is in effect.
    ///
    /// The returned future may stay pending forever if the subsystem stalls;
    /// callers that need a deadline wrap it themselves.
    async fn request_transition(
        &self,
        request: TransitionRequest,
    ) -> Result<TransitionCompleted, TransitionError>;
}
