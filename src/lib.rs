//! # regionstat
//!
//! Per-region latency statistics over an in-memory telemetry dataset.
//!
//! A dataset of latency observations is loaded once at startup, frozen, and
//! shared by every request. Each request names a list of regions and a
//! latency threshold and gets back, per region and in request order, the
//! mean latency, the 95th percentile latency, the mean uptime and the number
//! of observations above the threshold.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Service                             │
//! │  ┌──────────┐    ┌────────────┐    ┌──────────────┐          │
//! │  │  server  │───▶│   stats    │───▶│   dataset    │          │
//! │  │  (HTTP)  │    │(Aggregator)│    │(DatasetStore)│          │
//! │  └──────────┘    └────────────┘    └──────▲───────┘          │
//! │                                           │                  │
//! │                           FileSource | MemorySource          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`dataset`]**: the [`DatasetSource`] trait, its file and in-memory
//!   implementations, and the immutable [`DatasetStore`]
//! - **[`stats`]**: the [`Aggregator`] and the percentile/mean helpers
//! - **[`server`]**: hyper-based HTTP endpoint with CORS and health checks
//! - **[`settings`]**: layered configuration
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! regionstat --data q-vercel-latency.json --listen 0.0.0.0:8000
//!
//! curl -s localhost:8000/api/latency \
//!     -d '{"regions":["apac","emea"],"threshold_ms":180}'
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use regionstat::{Aggregator, DatasetStore, MemorySource, Observation};
//!
//! let source = MemorySource::new("fixture", vec![
//!     Observation::new("a", 100.0, 99.0),
//!     Observation::new("a", 300.0, 98.0),
//!     Observation::new("b", 50.0, 100.0),
//! ]);
//! let store = DatasetStore::load(&source).into_store();
//! let aggregator = Aggregator::new(Arc::new(store));
//!
//! let results = aggregator.compute(&["a", "b", "c"], 150.0);
//! assert_eq!(results[0].breaches, 1);
//! assert_eq!(results[1].p95_latency, 50.0);
//! assert!(results[2].is_zero());
//! ```

pub mod dataset;
pub mod error;
pub mod server;
pub mod settings;
pub mod stats;

// Re-export main types for convenience
pub use dataset::{DatasetSource, DatasetStore, FileSource, LoadOutcome, MemorySource};
pub use error::{DatasetError, RequestError, ServerError};
pub use regionstat_types::{LatencyRequest, Observation, RegionResult};
pub use server::{ApiServer, CorsPolicy, ServerConfig};
pub use settings::{Overrides, Settings};
pub use stats::Aggregator;
