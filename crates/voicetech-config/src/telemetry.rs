pub mod exporters;
pub mod tracing;

use std::collections::HashMap;

use serde::Deserialize;

use self::{exporters::ExporterConfig, tracing::TracingConfig};

/// Telemetry configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name for telemetry metadata
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Console log format
    #[serde(default)]
    pub log_format: LogFormat,
    /// Additional resource attributes
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
    /// OTLP exporter shared by traces and metrics
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
    /// Tracing-specific configuration
    #[serde(default)]
    pub tracing: Option<TracingConfig>,
}

/// Console log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl TelemetryConfig {
    /// Effective trace sampling rate
    pub fn sampling_rate(&self) -> f64 {
        self.tracing.as_ref().map_or(1.0, |t| t.sampling_rate)
    }
}

fn default_service_name() -> String {
    "voicetech".to_string()
}
