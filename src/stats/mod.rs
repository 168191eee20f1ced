//! Per-region latency statistics.
//!
//! - [`percentile`]: linear interpolation between closest ranks
//! - [`aggregator`]: groups observations by requested region and summarises them
//!
//! ## Data Flow
//!
//! ```text
//! LatencyRequest { regions, threshold_ms }
//!        │
//!        ▼
//! Aggregator::compute()
//!        │
//!        ├──▶ DatasetStore::observations_for(region)   (per requested region)
//!        │
//!        └──▶ RegionResult (mean, p95, mean uptime, breaches)
//! ```

pub mod aggregator;
pub mod percentile;

pub use aggregator::Aggregator;
pub use percentile::{mean, percentile, P95};
