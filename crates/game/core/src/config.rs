use crate::state::MapId;

/// Tunable parameters for fast travel.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TravelConfig {
    /// Rings scanned around a destination before falling back to the raw target.
    /// The search area is a `(2r + 1)²` square.
    pub max_search_radius: u32,
    /// Map every fast travel returns to before relocating.
    pub home_map: MapId,
    /// Chunks kept loaded around the active center, per direction.
    pub active_region_radius: u32,
}

impl TravelConfig {
    pub const DEFAULT_MAX_SEARCH_RADIUS: u32 = 9;
    pub const DEFAULT_ACTIVE_REGION_RADIUS: u32 = 1;

    pub fn new() -> Self {
        Self {
            max_search_radius: Self::DEFAULT_MAX_SEARCH_RADIUS,
            home_map: MapId::overworld(),
            active_region_radius: Self::DEFAULT_ACTIVE_REGION_RADIUS,
        }
    }

    pub fn with_max_search_radius(mut self, max_search_radius: u32) -> Self {
        self.max_search_radius = max_search_radius;
        self
    }

    pub fn with_home_map(mut self, home_map: impl Into<MapId>) -> Self {
        self.home_map = home_map.into();
        self
    }
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self::new()
    }
}
