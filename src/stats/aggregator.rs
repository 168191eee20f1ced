//! Per-region aggregation over the frozen dataset.

use std::sync::Arc;

use regionstat_types::{LatencyRequest, RegionResult};

use super::percentile::{mean, percentile, P95};
use crate::dataset::DatasetStore;

/// Computes per-region statistics against a shared dataset.
///
/// Stateless apart from the shared store, so clones can be handed to any
/// number of concurrent request handlers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use regionstat::{Aggregator, DatasetStore, Observation};
///
/// let store = DatasetStore::new(vec![
///     Observation::new("a", 100.0, 99.0),
///     Observation::new("a", 300.0, 98.0),
/// ]);
/// let aggregator = Aggregator::new(Arc::new(store));
///
/// let results = aggregator.compute(&["a", "missing"], 150.0);
/// assert_eq!(results[0].avg_latency, 200.0);
/// assert_eq!(results[0].breaches, 1);
/// assert_eq!(results[1].avg_latency, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator {
    store: Arc<DatasetStore>,
}

impl Aggregator {
    /// Create an aggregator over a shared store.
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self { store }
    }

    /// The store being aggregated.
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Compute one result per requested region, in request order.
    ///
    /// Duplicate regions produce duplicate, independently computed entries.
    /// Regions with no observations produce a zero-valued result.
    pub fn compute<S: AsRef<str>>(&self, regions: &[S], threshold_ms: f64) -> Vec<RegionResult> {
        regions
            .iter()
            .map(|region| self.summarize(region.as_ref(), threshold_ms))
            .collect()
    }

    /// Compute results for a decoded request.
    pub fn compute_request(&self, request: &LatencyRequest) -> Vec<RegionResult> {
        self.compute(&request.regions, request.threshold_ms)
    }

    fn summarize(&self, region: &str, threshold_ms: f64) -> RegionResult {
        let mut latencies = Vec::new();
        let mut uptimes = Vec::new();
        let mut breaches = 0u64;

        for obs in self.store.observations_for(region) {
            latencies.push(obs.latency_ms);
            uptimes.push(obs.uptime_pct);
            if obs.exceeds(threshold_ms) {
                breaches += 1;
            }
        }

        let (Some(avg_latency), Some(p95_latency), Some(avg_uptime)) = (
            mean(&latencies),
            percentile(&latencies, P95),
            mean(&uptimes),
        ) else {
            return RegionResult::empty(region);
        };

        RegionResult {
            region: region.to_string(),
            avg_latency,
            p95_latency,
            avg_uptime,
            breaches,
        }
    }
}
