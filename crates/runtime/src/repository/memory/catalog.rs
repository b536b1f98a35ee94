//! In-memory CatalogRepository implementation for tests and local runs.

use std::sync::RwLock;

use travel_core::LocationCatalog;

use crate::repository::{CatalogRepository, RepositoryError, Result};

/// In-memory implementation of CatalogRepository.
#[derive(Default)]
pub struct InMemoryCatalogRepo {
    catalog: RwLock<Option<LocationCatalog>>,
}

impl InMemoryCatalogRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a catalog already saved.
    pub fn with_catalog(catalog: LocationCatalog) -> Self {
        Self {
            catalog: RwLock::new(Some(catalog)),
        }
    }
}

impl CatalogRepository for InMemoryCatalogRepo {
    fn save(&self, catalog: &LocationCatalog) -> Result<()> {
        let mut stored = self
            .catalog
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = Some(catalog.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<LocationCatalog>> {
        let stored = self
            .catalog
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(stored.clone())
    }

    fn exists(&self) -> bool {
        self.catalog
            .read()
            .map(|stored| stored.is_some())
            .unwrap_or(false)
    }
}
