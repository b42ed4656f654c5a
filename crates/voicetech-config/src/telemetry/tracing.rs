use serde::Deserialize;

/// Tracing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TracingConfig {
    /// Sampling rate (0.0 to 1.0)
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,
    /// Use parent-based sampler
    #[serde(default = "default_true")]
    pub parent_based: bool,
}

#[allow(clippy::missing_const_for_fn)]
fn default_sampling_rate() -> f64 {
    1.0
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}
