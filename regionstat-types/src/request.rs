//! Request - which regions to summarise and against which threshold.

/// A request for per-region statistics.
///
/// Regions are kept in the order given. Duplicates are not removed; each
/// occurrence yields its own result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatencyRequest {
    /// Region identifiers to report on, in output order.
    pub regions: Vec<String>,

    /// Latency above which an observation counts as a breach.
    pub threshold_ms: f64,
}

impl LatencyRequest {
    /// Create a new request.
    pub fn new<I, S>(regions: I, threshold_ms: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            threshold_ms,
        }
    }

    /// Check if the request names no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_order_and_duplicates() {
        let request = LatencyRequest::new(["b", "a", "b"], 10.0);
        assert_eq!(request.regions, vec!["b", "a", "b"]);
        assert!(!request.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_request() {
        let json = r#"{"regions":["emea","amer"],"threshold_ms":180}"#;
        let request: LatencyRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.regions, vec!["emea", "amer"]);
        assert_eq!(request.threshold_ms, 180.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_string_threshold() {
        let json = r#"{"regions":["emea"],"threshold_ms":"fast"}"#;
        assert!(serde_json::from_str::<LatencyRequest>(json).is_err());
    }
}
