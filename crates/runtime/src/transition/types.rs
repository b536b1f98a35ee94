use thiserror::Error;

use travel_core::{DungeonContext, ErrorSeverity, GameError, MapContext, MapId};

/// What happens to the dungeon bookkeeping when the map changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DungeonUpdate {
    #[default]
    Keep,
    /// Clear floor index and dungeon kind.
    Reset,
    Enter(DungeonContext),
}

impl DungeonUpdate {
    pub fn apply(self, current: DungeonContext) -> DungeonContext {
        match self {
            DungeonUpdate::Keep => current,
            DungeonUpdate::Reset => DungeonContext::default(),
            DungeonUpdate::Enter(dungeon) => dungeon,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRequest {
    pub target: MapId,
    pub dungeon: DungeonUpdate,
}

impl TransitionRequest {
    pub fn to(target: impl Into<MapId>) -> Self {
        Self {
            target: target.into(),
            dungeon: DungeonUpdate::Keep,
        }
    }

    /// Return to the home map, leaving any dungeon behind.
    pub fn home(home: impl Into<MapId>) -> Self {
        Self {
            target: home.into(),
            dungeon: DungeonUpdate::Reset,
        }
    }

    pub fn enter_dungeon(target: impl Into<MapId>, dungeon: DungeonContext) -> Self {
        Self {
            target: target.into(),
            dungeon: DungeonUpdate::Enter(dungeon),
        }
    }
}

/// Completion signal for a transition; carries the context now in effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionCompleted {
    pub context: MapContext,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("map '{0}' is not registered with the transition subsystem")]
    UnknownMap(MapId),

    #[error("transition worker is not running")]
    WorkerClosed,

    #[error("transition worker dropped the request without replying")]
    ReplyDropped,
}

impl GameError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TransitionError::UnknownMap(_) => ErrorSeverity::Validation,
            TransitionError::WorkerClosed | TransitionError::ReplyDropped => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TransitionError::UnknownMap(_) => "TRANSITION_UNKNOWN_MAP",
            TransitionError::WorkerClosed => "TRANSITION_WORKER_CLOSED",
            TransitionError::ReplyDropped => "TRANSITION_REPLY_DROPPED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_core::DungeonKind;

    #[test]
    fn dungeon_updates_apply_to_current_context() {
        let inside = DungeonContext::new(3, DungeonKind::Crypt);

        assert_eq!(DungeonUpdate::Keep.apply(inside), inside);
        assert_eq!(DungeonUpdate::Reset.apply(inside), DungeonContext::default());

        let tower = DungeonContext::new(1, DungeonKind::Tower);
        assert_eq!(DungeonUpdate::Enter(tower).apply(inside), tower);
    }

    #[test]
    fn home_request_resets_dungeon() {
        let request = TransitionRequest::home("overworld");
        assert_eq!(request.dungeon, DungeonUpdate::Reset);
        assert_eq!(request.target, MapId::overworld());
    }
}
