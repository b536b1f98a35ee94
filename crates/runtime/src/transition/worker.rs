//! Worker task that owns the active [`MapContext`].
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use travel_core::{MapContext, MapId};

use super::{MapTransitions, TransitionCompleted, TransitionError, TransitionRequest};
use crate::events::{EventBus, MapEvent};
use crate::oracle::MapDescriptor;

struct TransitionCommand {
    request: TransitionRequest,
    reply: oneshot::Sender<Result<TransitionCompleted, TransitionError>>,
}

/// Cloneable client of the [`TransitionWorker`].
///
/// Reads come from a `watch` channel and never block; changes are a
/// request/reply handshake with the worker.
#[derive(Clone)]
pub struct TransitionHandle {
    request_tx: mpsc::Sender<TransitionCommand>,
    context_rx: watch::Receiver<MapContext>,
}

impl TransitionHandle {
    /// Receiver that observes every context the worker publishes.
    pub fn watch(&self) -> watch::Receiver<MapContext> {
        self.context_rx.clone()
    }
}

#[async_trait]
impl MapTransitions for TransitionHandle {
    fn current_context(&self) -> MapContext {
        self.context_rx.borrow().clone()
    }

    async fn request_transition(
        &self,
        request: TransitionRequest,
    ) -> Result<TransitionCompleted, TransitionError> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.request_tx
            .send(TransitionCommand {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| TransitionError::WorkerClosed)?;

        reply_rx.await.map_err(|_| TransitionError::ReplyDropped)?
    }
}

/// Background task that applies map transitions one at a time.
pub struct TransitionWorker {
    maps: HashMap<MapId, MapDescriptor>,
    context_tx: watch::Sender<MapContext>,
    request_rx: mpsc::Receiver<TransitionCommand>,
    event_bus: EventBus,
}

impl TransitionWorker {
    /// Spawns the worker and returns its handle.
    ///
    /// The worker stops once every [`TransitionHandle`] is dropped.
    pub fn spawn(
        maps: impl IntoIterator<Item = MapDescriptor>,
        initial: MapContext,
        event_bus: EventBus,
        buffer_size: usize,
    ) -> (TransitionHandle, JoinHandle<()>) {
        let (request_tx, request_rx) = mpsc::channel(buffer_size.max(1));
        let (context_tx, context_rx) = watch::channel(initial);

        let worker = Self {
            maps: maps
                .into_iter()
                .map(|descriptor| (descriptor.map_id.clone(), descriptor))
                .collect(),
            context_tx,
            request_rx,
            event_bus,
        };

        let join = tokio::spawn(async move {
            worker.run().await;
        });

        (
            TransitionHandle {
                request_tx,
                context_rx,
            },
            join,
        )
    }

    async fn run(mut self) {
        while let Some(TransitionCommand { request, reply }) = self.request_rx.recv().await {
            let result = self.apply(request);
            if reply.send(result).is_err() {
                debug!("Transition reply channel closed (caller dropped)");
            }
        }
        debug!("TransitionWorker stopped");
    }

    fn apply(
        &mut self,
        request: TransitionRequest,
    ) -> Result<TransitionCompleted, TransitionError> {
        let descriptor = self
            .maps
            .get(&request.target)
            .ok_or_else(|| TransitionError::UnknownMap(request.target.clone()))?;

        let previous = self.context_tx.borrow().clone();
        let dungeon = request.dungeon.apply(previous.dungeon);
        let context = MapContext::new(descriptor.map_id.clone(), descriptor.is_chunked)
            .with_dungeon(dungeon);
        let dungeon_reset = previous.dungeon.is_inside() && !dungeon.is_inside();

        self.context_tx.send_replace(context.clone());

        info!(
            from = %previous.map_id,
            to = %context.map_id,
            dungeon_reset,
            "map transition completed"
        );
        self.event_bus.publish(MapEvent::TransitionCompleted {
            from: previous.map_id,
            to: context.map_id.clone(),
            dungeon_reset,
        });

        Ok(TransitionCompleted { context })
    }
}
