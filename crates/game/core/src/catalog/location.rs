use std::fmt;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::state::Position;

/// Stable identifier of a visited location (e.g. `"oakvale"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LocationId(String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LocationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category a location is listed under in the travel menu.
///
/// Declaration order is the order groups are presented in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationKind {
    Town,
    Dungeon,
}

/// A location the traveler has discovered.
///
/// The position is a snapshot taken at discovery time; later terrain changes
/// around it never update the record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitedLocation {
    id: LocationId,
    kind: LocationKind,
    display_name: String,
    position: Position,
}

impl VisitedLocation {
    pub fn new(
        id: impl Into<LocationId>,
        kind: LocationKind,
        display_name: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            display_name: display_name.into(),
            position,
        }
    }

    pub fn town(
        id: impl Into<LocationId>,
        display_name: impl Into<String>,
        position: Position,
    ) -> Self {
        Self::new(id, LocationKind::Town, display_name, position)
    }

    pub fn dungeon(
        id: impl Into<LocationId>,
        display_name: impl Into<String>,
        position: Position,
    ) -> Self {
        Self::new(id, LocationKind::Dungeon, display_name, position)
    }

    pub fn id(&self) -> &LocationId {
        &self.id
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn position(&self) -> Position {
        self.position
    }
}
