//! # regionstat-types
//!
//! Core types for regional latency telemetry. This crate defines the shapes
//! exchanged between a dataset of latency observations, the aggregator that
//! summarises them, and whatever transport sits in front of it.
//!
//! ## Features
//!
//! - `serde`: JSON (or any serde format) serialization of every type
//!
//! ## Example
//!
//! ```rust
//! use regionstat_types::{LatencyRequest, Observation, RegionResult};
//!
//! let obs = Observation::new("us-east", 120.0, 99.9);
//! assert_eq!(obs.region, "us-east");
//!
//! let request = LatencyRequest::new(["us-east", "eu-west"], 150.0);
//! assert_eq!(request.regions.len(), 2);
//!
//! let empty = RegionResult::empty("ap-south");
//! assert_eq!(empty.breaches, 0);
//! ```

mod observation;
mod request;
mod result;

pub use observation::*;
pub use request::*;
pub use result::*;
