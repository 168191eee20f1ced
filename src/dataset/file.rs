//! File-based dataset source.
//!
//! Reads a JSON array of observation records.

use std::fs;
use std::path::{Path, PathBuf};

use regionstat_types::Observation;

use super::DatasetSource;
use crate::error::DatasetError;

/// A dataset source that reads observations from a JSON file.
///
/// The file must contain an array of objects with at least `region`,
/// `latency_ms` and `uptime_pct`. Any other fields are ignored.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn load(&self) -> Result<Vec<Observation>, DatasetError> {
        let content = fs::read_to_string(&self.path).map_err(|source| DatasetError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"[
            { "region": "apac", "service": "recon", "latency_ms": 132.5, "uptime_pct": 98.4, "timestamp": 20250301 },
            { "region": "emea", "service": "catalog", "latency_ms": 201.0, "uptime_pct": 99.1, "timestamp": 20250302 },
            { "region": "apac", "service": "payments", "latency_ms": 170.25, "uptime_pct": 97.0, "timestamp": 20250303 }
        ]"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/latency.json");
        assert_eq!(source.path(), Path::new("/tmp/latency.json"));
        assert_eq!(source.description(), "file: /tmp/latency.json");
    }

    #[test]
    fn test_file_source_loads_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let observations = FileSource::new(file.path()).load().unwrap();

        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0], Observation::new("apac", 132.5, 98.4));
        assert_eq!(observations[1].region, "emea");
        assert_eq!(observations[2].latency_ms, 170.25);
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/path/latency.json");

        let err = source.load().unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
        assert!(err.to_string().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let err = FileSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn test_file_source_record_missing_field() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{ "region": "apac", "latency_ms": 10.0 }}]"#).unwrap();

        let err = FileSource::new(file.path()).load().unwrap_err();
        assert!(err.to_string().contains("uptime_pct"));
    }
}
