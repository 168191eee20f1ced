//! Immutable, region-indexed view over the loaded observations.

use std::fmt;

use regionstat_types::Observation;
use tracing::{info, warn};

use super::DatasetSource;
use crate::error::DatasetError;

/// The frozen collection of observations.
///
/// Built exactly once and never mutated afterwards, so it can be shared
/// across request handlers behind an `Arc` without any locking.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    observations: Vec<Observation>,
}

/// Result of loading a dataset.
///
/// A failed load is not fatal: the store falls back to empty and every
/// query against it yields zeroed results.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The source was read successfully.
    Loaded(DatasetStore),
    /// The source failed; the store is empty.
    Fallback {
        store: DatasetStore,
        error: DatasetError,
    },
}

impl LoadOutcome {
    /// The store, whichever branch was taken.
    pub fn into_store(self) -> DatasetStore {
        match self {
            LoadOutcome::Loaded(store) => store,
            LoadOutcome::Fallback { store, .. } => store,
        }
    }

    /// The load error, if the empty fallback was used.
    pub fn error(&self) -> Option<&DatasetError> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Fallback { error, .. } => Some(error),
        }
    }

    /// Human-readable summary of a successful load, one line per region.
    ///
    /// Returns the load error instead when the empty fallback was used.
    pub fn report(self) -> Result<String, DatasetError> {
        let store = match self {
            LoadOutcome::Loaded(store) => store,
            LoadOutcome::Fallback { error, .. } => return Err(error),
        };

        let mut report = format!("{}\n", store);
        for region in store.regions() {
            report.push_str(&format!(
                "  {} ({} observations)\n",
                region,
                store.observations_for(region).count()
            ));
        }
        Ok(report)
    }

    /// Check if the fallback store was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }
}

impl DatasetStore {
    /// Freeze a set of observations into a store.
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Create an empty store.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a store from a source, falling back to empty on failure.
    pub fn load(source: &dyn DatasetSource) -> LoadOutcome {
        match source.load() {
            Ok(observations) => {
                let store = Self::new(observations);
                info!(
                    source = source.description(),
                    observations = store.len(),
                    regions = store.regions().len(),
                    "Dataset loaded"
                );
                LoadOutcome::Loaded(store)
            }
            Err(error) => {
                warn!(
                    source = source.description(),
                    %error,
                    "Dataset load failed, serving an empty dataset"
                );
                LoadOutcome::Fallback {
                    store: Self::empty(),
                    error,
                }
            }
        }
    }

    /// All observations recorded for `region`, in load order.
    ///
    /// Yields nothing when the region is unknown or the store is empty.
    pub fn observations_for<'a>(
        &'a self,
        region: &'a str,
    ) -> impl Iterator<Item = &'a Observation> + 'a {
        self.observations.iter().filter(move |o| o.region == region)
    }

    /// Distinct region identifiers, in order of first appearance.
    pub fn regions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for obs in &self.observations {
            if !seen.contains(&obs.region.as_str()) {
                seen.push(&obs.region);
            }
        }
        seen
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the store holds no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterate over all observations.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }
}

impl fmt::Display for DatasetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} observations across {} regions",
            self.len(),
            self.regions().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{FileSource, MemorySource};

    fn sample_store() -> DatasetStore {
        DatasetStore::new(vec![
            Observation::new("a", 100.0, 99.0),
            Observation::new("b", 50.0, 100.0),
            Observation::new("a", 300.0, 98.0),
        ])
    }

    #[test]
    fn test_observations_for_preserves_load_order() {
        let store = sample_store();
        let latencies: Vec<f64> = store.observations_for("a").map(|o| o.latency_ms).collect();
        assert_eq!(latencies, vec![100.0, 300.0]);
    }

    #[test]
    fn test_observations_for_unknown_region() {
        let store = sample_store();
        assert_eq!(store.observations_for("zz").count(), 0);
    }

    #[test]
    fn test_observations_for_is_exact_match() {
        let store = sample_store();
        assert_eq!(store.observations_for("A").count(), 0);
        assert_eq!(store.observations_for("").count(), 0);
    }

    #[test]
    fn test_empty_store() {
        let store = DatasetStore::empty();
        assert!(store.is_empty());
        assert_eq!(store.observations_for("a").count(), 0);
        assert!(store.regions().is_empty());
    }

    #[test]
    fn test_regions_first_seen_order() {
        let store = sample_store();
        assert_eq!(store.regions(), vec!["a", "b"]);
        assert_eq!(store.to_string(), "3 observations across 2 regions");
    }

    #[test]
    fn test_load_success() {
        let source = MemorySource::new("test", vec![Observation::new("a", 1.0, 2.0)]);
        let outcome = DatasetStore::load(&source);

        assert!(!outcome.is_fallback());
        assert!(outcome.error().is_none());
        assert_eq!(outcome.into_store().len(), 1);
    }

    #[test]
    fn test_report_lists_regions() {
        let source = MemorySource::new("test", sample_store().iter().cloned().collect());
        let report = DatasetStore::load(&source).report().unwrap();

        assert_eq!(
            report,
            "3 observations across 2 regions\n  a (2 observations)\n  b (1 observations)\n"
        );
    }

    #[test]
    fn test_report_fails_on_fallback() {
        let source = FileSource::new("/nonexistent/path/latency.json");
        let err = DatasetStore::load(&source).report().unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
    }

    #[test]
    fn test_load_failure_falls_back_to_empty() {
        let source = FileSource::new("/nonexistent/path/latency.json");
        let outcome = DatasetStore::load(&source);

        assert!(outcome.is_fallback());
        assert!(matches!(outcome.error(), Some(DatasetError::Read { .. })));
        assert!(outcome.into_store().is_empty());
    }
}
