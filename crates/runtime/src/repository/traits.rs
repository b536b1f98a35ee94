//! Repository contract for saving and loading the visited-location catalog.

use travel_core::LocationCatalog;

use super::Result;

/// Persistence for the [`LocationCatalog`].
///
/// The catalog is small and append-only, so it is always saved and loaded as
/// a whole.
pub trait CatalogRepository: Send + Sync {
    /// Replace the stored catalog.
    fn save(&self, catalog: &LocationCatalog) -> Result<()>;

    /// Load the stored catalog, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<LocationCatalog>>;

    /// Check if a catalog has been saved.
    fn exists(&self) -> bool;
}
