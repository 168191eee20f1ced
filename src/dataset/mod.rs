//! Dataset loading and lookup.
//!
//! Observations are read once from a [`DatasetSource`] at startup and frozen
//! into a [`DatasetStore`]. A failed load never aborts the process: it yields
//! an empty store and the failure is reported through [`LoadOutcome`].

mod file;
mod memory;
mod store;

pub use file::FileSource;
pub use memory::MemorySource;
pub use store::{DatasetStore, LoadOutcome};

use std::fmt::Debug;

use regionstat_types::Observation;

use crate::error::DatasetError;

/// Trait for loading latency observations from various backends.
///
/// # Example
///
/// ```
/// use regionstat::{DatasetSource, FileSource};
///
/// let source = FileSource::new("q-vercel-latency.json");
/// match source.load() {
///     Ok(observations) => println!("Loaded {} observations", observations.len()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub trait DatasetSource: Send + Sync + Debug {
    /// Load every observation, in source order.
    fn load(&self) -> Result<Vec<Observation>, DatasetError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
