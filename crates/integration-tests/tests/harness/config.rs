//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use voicetech_config::{Config, CorsConfig, HealthConfig, ModelConfig, OutputConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder writing audio into `output`
    ///
    /// The model uses its default dimensions with a fixed seed.
    pub fn new(output: &Path) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                output: OutputConfig {
                    directory: output.to_path_buf(),
                },
                model: ModelConfig {
                    seed: Some(42),
                    ..ModelConfig::default()
                },
                telemetry: None,
            },
        }
    }

    /// Start without a model, as when loading fails
    pub fn without_model(mut self) -> Self {
        self.config.model.enabled = false;
        self
    }

    /// Replace the model configuration
    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.config.model = model;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
