//! Value types describing a single fast-travel action.

use strum::Display;

use crate::catalog::LocationId;
use crate::state::Position;

/// Steps of the travel pipeline. Progress is strictly forward; there is no
/// retry or branch back to an earlier phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum TravelPhase {
    Idle,
    EnsuringRegionLoaded,
    MaybeTransitioningMap,
    Searching,
    Relocating,
    Notifying,
    Done,
}

impl TravelPhase {
    /// The phase that follows this one. `Done` is terminal.
    pub const fn next(self) -> Self {
        match self {
            TravelPhase::Idle => TravelPhase::EnsuringRegionLoaded,
            TravelPhase::EnsuringRegionLoaded => TravelPhase::MaybeTransitioningMap,
            TravelPhase::MaybeTransitioningMap => TravelPhase::Searching,
            TravelPhase::Searching => TravelPhase::Relocating,
            TravelPhase::Relocating => TravelPhase::Notifying,
            TravelPhase::Notifying | TravelPhase::Done => TravelPhase::Done,
        }
    }
}

/// Outcome of one completed fast travel. Handed to observers, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelocationResult {
    pub location_id: LocationId,
    pub display_name: String,
    pub previous_position: Position,
    pub final_position: Position,
    /// Ring the landing tile was found on; `None` for a degraded landing.
    pub search_radius: Option<u32>,
    /// The search found no walkable tile and the traveler was placed on the raw
    /// target, which may be blocked terrain.
    pub degraded: bool,
}
