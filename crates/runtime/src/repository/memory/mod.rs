//! In-memory repository implementations for testing and development.

mod catalog;

pub use catalog::InMemoryCatalogRepo;
