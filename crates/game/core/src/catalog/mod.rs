//! Catalog of locations the traveler has discovered.
//!
//! Entries are appended by the discovery tracker and never removed. The
//! catalog keeps discovery order, which is what the travel menu shows within
//! each [`LocationKind`] group.
mod location;

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::error::{ErrorSeverity, GameError};

pub use location::{LocationId, LocationKind, VisitedLocation};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("location '{0}' has not been visited")]
    NotFound(LocationId),

    #[error("location '{0}' is already recorded")]
    DuplicateId(LocationId),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogError::NotFound(_) => ErrorSeverity::Recoverable,
            CatalogError::DuplicateId(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "CATALOG_NOT_FOUND",
            CatalogError::DuplicateId(_) => "CATALOG_DUPLICATE_ID",
        }
    }
}

/// Insertion-ordered set of visited locations with unique ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<VisitedLocation>", into = "Vec<VisitedLocation>")
)]
pub struct LocationCatalog {
    entries: Vec<VisitedLocation>,
    index: HashMap<LocationId, usize>,
}

impl LocationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a newly discovered location.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if a location with the same id is
    /// already recorded; the catalog is left unchanged.
    pub fn record(&mut self, location: VisitedLocation) -> Result<(), CatalogError> {
        if self.index.contains_key(location.id()) {
            return Err(CatalogError::DuplicateId(location.id().clone()));
        }

        self.index.insert(location.id().clone(), self.entries.len());
        self.entries.push(location);
        Ok(())
    }

    /// Looks up a location by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for ids that were never recorded.
    pub fn get(&self, id: &LocationId) -> Result<&VisitedLocation, CatalogError> {
        self.index
            .get(id)
            .and_then(|&slot| self.entries.get(slot))
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.index.contains_key(id)
    }

    /// All locations of `kind`, in discovery order.
    pub fn query(&self, kind: LocationKind) -> impl Iterator<Item = &VisitedLocation> + '_ {
        self.entries
            .iter()
            .filter(move |location| location.kind() == kind)
    }

    /// Every kind (in declaration order) paired with its locations.
    ///
    /// Kinds with no entries are skipped.
    pub fn grouped(&self) -> Vec<(LocationKind, Vec<&VisitedLocation>)> {
        LocationKind::iter()
            .map(|kind| (kind, self.query(kind).collect::<Vec<_>>()))
            .filter(|(_, locations)| !locations.is_empty())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisitedLocation> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<VisitedLocation>> for LocationCatalog {
    type Error = CatalogError;

    fn try_from(entries: Vec<VisitedLocation>) -> Result<Self, Self::Error> {
        let mut catalog = Self::new();
        for location in entries {
            catalog.record(location)?;
        }
        Ok(catalog)
    }
}

impl From<LocationCatalog> for Vec<VisitedLocation> {
    fn from(catalog: LocationCatalog) -> Self {
        catalog.entries
    }
}
