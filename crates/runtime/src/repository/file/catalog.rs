//! File-based CatalogRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use travel_core::LocationCatalog;

use crate::repository::{CatalogRepository, RepositoryError, Result};

/// File-based implementation of CatalogRepository.
///
/// The catalog is stored as a single `catalog.bin` file in bincode format.
/// Writes go to a temporary file first and are moved into place with a
/// rename, so a crash never leaves a half-written catalog behind.
pub struct FileCatalogRepository {
    base_dir: PathBuf,
}

impl FileCatalogRepository {
    const FILE_NAME: &'static str = "catalog.bin";

    /// Create a new file-based catalog repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Path of the catalog file.
    pub fn catalog_path(&self) -> PathBuf {
        self.base_dir.join(Self::FILE_NAME)
    }
}

impl CatalogRepository for FileCatalogRepository {
    fn save(&self, catalog: &LocationCatalog) -> Result<()> {
        let path = self.catalog_path();
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(catalog)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved catalog ({} locations) to {}",
            catalog.len(),
            path.display()
        );

        Ok(())
    }

    fn load(&self) -> Result<Option<LocationCatalog>> {
        let path = self.catalog_path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        // Deserialization goes through `LocationCatalog::try_from`, so a file
        // with duplicate ids is rejected here.
        let catalog: LocationCatalog = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(e.to_string()))?;

        tracing::debug!(
            "Loaded catalog ({} locations) from {}",
            catalog.len(),
            path.display()
        );

        Ok(Some(catalog))
    }

    fn exists(&self) -> bool {
        self.catalog_path().exists()
    }
}
