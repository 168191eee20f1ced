//! Observation - a single recorded latency sample.

/// One latency/uptime sample tagged with the region it was recorded in.
///
/// Observations are created once when a dataset is loaded and are never
/// mutated afterwards. Extra fields in serialized records are ignored.
///
/// # Example
///
/// ```rust
/// use regionstat_types::Observation;
///
/// let obs = Observation::new("eu-west", 87.5, 99.2);
/// assert!(obs.exceeds(80.0));
/// assert!(!obs.exceeds(87.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Opaque region identifier (e.g. a deployment location).
    pub region: String,

    /// Measured latency in milliseconds.
    pub latency_ms: f64,

    /// Uptime percentage, nominally in `[0, 100]` (not validated).
    pub uptime_pct: f64,
}

impl Observation {
    /// Create a new observation.
    pub fn new(region: impl Into<String>, latency_ms: f64, uptime_pct: f64) -> Self {
        Self {
            region: region.into(),
            latency_ms,
            uptime_pct,
        }
    }

    /// Whether this sample breaches the given threshold.
    ///
    /// The comparison is strict: a latency equal to the threshold is not a breach.
    pub fn exceeds(&self, threshold_ms: f64) -> bool {
        self.latency_ms > threshold_ms
    }
}
