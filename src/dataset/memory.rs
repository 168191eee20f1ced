//! In-memory dataset source.

use regionstat_types::Observation;

use super::DatasetSource;
use crate::error::DatasetError;

/// A dataset source backed by a vector already in memory.
///
/// Useful for embedding the aggregator in another process or for tests.
///
/// # Example
///
/// ```
/// use regionstat::{DatasetStore, MemorySource, Observation};
///
/// let source = MemorySource::new("fixture", vec![Observation::new("a", 100.0, 99.0)]);
/// let store = DatasetStore::load(&source).into_store();
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    observations: Vec<Observation>,
    description: String,
}

impl MemorySource {
    /// Create a new in-memory source.
    pub fn new(name: &str, observations: Vec<Observation>) -> Self {
        Self {
            observations,
            description: format!("memory: {}", name),
        }
    }
}

impl DatasetSource for MemorySource {
    fn load(&self) -> Result<Vec<Observation>, DatasetError> {
        Ok(self.observations.clone())
    }

    fn description(&self) -> &str {
        &self.description
    }
}
