//! Visited-location catalog loader.

use std::path::Path;

use travel_core::{LocationCatalog, LocationKind, Position, VisitedLocation};

use crate::loaders::{LoadResult, read_file};

/// Loader for the catalog seed from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file.
    ///
    /// File format: `Vec<(id, kind, display_name, (x, y))>` in discovery order.
    ///
    /// ```ron
    /// [
    ///     ("oakvale", Town, "Oakvale", (10, 10)),
    ///     ("sunken-crypt", Dungeon, "Sunken Crypt", (-40, 12)),
    /// ]
    /// ```
    ///
    /// Duplicate ids are rejected.
    pub fn load(path: &Path) -> LoadResult<LocationCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<LocationCatalog> {
        let entries: Vec<(String, LocationKind, String, (i32, i32))> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        let mut catalog = LocationCatalog::new();
        for (id, kind, display_name, (x, y)) in entries {
            catalog.record(VisitedLocation::new(
                id,
                kind,
                display_name,
                Position::new(x, y),
            ))?;
        }

        Ok(catalog)
    }
}
