//! RegionResult - aggregate statistics for one requested region.

/// Aggregate latency statistics for a single region.
///
/// `region` always echoes the requested identifier verbatim, even when the
/// dataset holds no observations for it. In that case every numeric field
/// is zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionResult {
    /// The requested region identifier.
    pub region: String,

    /// Mean latency in milliseconds.
    pub avg_latency: f64,

    /// 95th percentile latency in milliseconds.
    pub p95_latency: f64,

    /// Mean uptime percentage.
    pub avg_uptime: f64,

    /// Number of observations strictly above the threshold.
    pub breaches: u64,
}

impl RegionResult {
    /// A zero-valued result for a region with no observations.
    pub fn empty(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            avg_latency: 0.0,
            p95_latency: 0.0,
            avg_uptime: 0.0,
            breaches: 0,
        }
    }

    /// Check if every statistic is zero.
    pub fn is_zero(&self) -> bool {
        self.avg_latency == 0.0
            && self.p95_latency == 0.0
            && self.avg_uptime == 0.0
            && self.breaches == 0
    }
}
