//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the travel pipeline, worker coordination and
//! repositories so clients can bubble them up with consistent context.
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;

use travel_core::{CatalogError, ErrorSeverity, GameError, LocationId};

pub use crate::repository::RepositoryError;
use crate::resolver::TravelError;
use crate::transition::TransitionError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Travel(#[from] TravelError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("travel to '{location}' did not finish within {timeout:?}")]
    TransitionStalled {
        location: LocationId,
        timeout: Duration,
    },

    #[error("travel worker command channel closed")]
    CommandChannelClosed,

    #[error("travel worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    /// True when the requested location was never visited; callers treat this
    /// as "nothing to do".
    pub fn is_not_found(&self) -> bool {
        match self {
            RuntimeError::Travel(err) => err.is_not_found(),
            RuntimeError::Catalog(err) => matches!(err, CatalogError::NotFound(_)),
            _ => false,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Travel(err) => err.severity(),
            RuntimeError::Catalog(err) => err.severity(),
            RuntimeError::Transition(err) => err.severity(),
            RuntimeError::TransitionStalled { .. } => ErrorSeverity::Recoverable,
            RuntimeError::Repository(_) => ErrorSeverity::Internal,
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Travel(err) => err.error_code(),
            RuntimeError::Catalog(err) => err.error_code(),
            RuntimeError::Transition(err) => err.error_code(),
            RuntimeError::TransitionStalled { .. } => "RUNTIME_TRANSITION_STALLED",
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
        }
    }
}
