#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod model;
pub mod output;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use model::*;
pub use output::*;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level VoiceTech configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Where synthesized audio is written
    #[serde(default)]
    pub output: OutputConfig,
    /// Acoustic model configuration
    #[serde(default)]
    pub model: ModelConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.server.listen_address.is_none());
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
        assert!(config.server.cors.is_none());
        assert_eq!(config.output.directory, std::path::PathBuf::from("outputs"));
        assert!(config.model.enabled);
        assert_eq!(config.model.seq_len, 150);
        assert!(config.telemetry.is_none());
    }

    #[test]
    fn full_document() {
        let toml = r#"
            [server]
            listen_address = "127.0.0.1:8000"

            [server.health]
            enabled = false
            path = "/healthz"

            [server.cors]
            origins = ["https://voicetech.example"]
            max_age = 600

            [output]
            directory = "/var/lib/voicetech/audio"

            [model]
            device = "cuda"
            seq_len = 200

            [telemetry]
            service_name = "tts-eu"

            [telemetry.exporter]
            endpoint = "http://collector:4317"
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(
            config.server.listen_address,
            Some("127.0.0.1:8000".parse().unwrap())
        );
        assert!(!config.server.health.enabled);
        assert_eq!(config.server.health.path, "/healthz");
        assert!(matches!(
            config.server.cors.as_ref().map(|c| &c.origins),
            Some(AnyOrArray::List(origins)) if origins == &["https://voicetech.example".to_string()]
        ));
        assert_eq!(config.model.device, "cuda");
        assert_eq!(config.model.seq_len, 200);
        assert_eq!(config.model.hop_length, 256);

        let telemetry = config.telemetry.unwrap();
        assert_eq!(telemetry.service_name, "tts-eu");
        assert_eq!(telemetry.exporter.unwrap().endpoint.as_str(), "http://collector:4317/");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<Config>("[model]\nlayers = 4\n");
        assert!(result.is_err());
    }
}
