//! Converters for generating load-test scripts from OpenAPI documents
//!
//! This module provides the converter trait, its options, and the k6
//! implementation together with the pieces it is assembled from.

pub mod body;
pub mod js;
pub mod k6;
pub mod registry;
pub mod tracking;

pub use k6::K6Converter;
pub use registry::Registry;

use crate::error::Result;
use serde_json::Value;

/// One ramping stage of the load profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// k6 duration string (e.g. "30s", "1m")
    pub duration: String,
    /// Target number of virtual users at the end of the stage
    pub target: u32,
    /// Comment rendered next to the stage
    pub label: String,
}

impl Stage {
    fn new(duration: &str, target: u32, label: &str) -> Self {
        Self {
            duration: duration.to_string(),
            target,
            label: label.to_string(),
        }
    }
}

/// Load profile rendered into the script's `options` export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProfile {
    pub stages: Vec<Stage>,
    /// Metric name to threshold expressions, in render order
    pub thresholds: Vec<(String, Vec<String>)>,
}

impl Default for LoadProfile {
    fn default() -> Self {
        Self {
            stages: vec![
                Stage::new("30s", 10, "Ramp up"),
                Stage::new("1m", 10, "Stay at 10 users"),
                Stage::new("30s", 0, "Ramp down"),
            ],
            thresholds: vec![
                ("http_req_duration".to_string(), vec!["p(95)<500".to_string()]),
                ("errors".to_string(), vec!["rate<0.1".to_string()]),
            ],
        }
    }
}

/// Configuration options for converters
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Authorization key used when `AUTH_KEY` is not set at run time
    pub auth_key: Option<String>,
    pub load_profile: LoadProfile,
}

/// A generated script and the number of endpoints it exercises
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    pub content: String,
    pub endpoint_count: usize,
}

/// Trait for converting OpenAPI documents to test scripts
pub trait Converter {
    /// The output type of the conversion
    type Output;

    /// Convert a raw OpenAPI document into a test script
    fn convert_spec(&self, spec: &Value, options: &ConvertOptions) -> Result<Self::Output>;
}
