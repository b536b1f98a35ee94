//! Worker tasks that back the runtime orchestration.
//!
//! The travel worker owns the catalog, terrain and traveler and executes
//! commands one at a time; map transitions run in their own worker (see
//! [`crate::transition`]).

mod travel;

pub use travel::{Command, TravelWorker};
