//! Repository layer for dynamic runtime data.
//!
//! Repositories handle data that CHANGES during play. For fast travel that is
//! the catalog of visited locations, which grows as the discovery tracker
//! records new towns and dungeons.
//!
//! Static content (terrain, map layouts) is served by the oracles, not
//! repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileCatalogRepository;
pub use memory::InMemoryCatalogRepo;
pub use traits::CatalogRepository;
