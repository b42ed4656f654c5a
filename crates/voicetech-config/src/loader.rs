use std::path::Path;

use crate::{Config, cors::MAX_CORS_MAX_AGE_SECS};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Model dimensions are not checked here. A model that cannot be built
    /// is reported as unavailable at runtime.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_output()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
        }

        if let Some(max_age) = self.server.cors.as_ref().and_then(|c| c.max_age)
            && max_age > MAX_CORS_MAX_AGE_SECS
        {
            anyhow::bail!("server.cors.max_age must not exceed {MAX_CORS_MAX_AGE_SECS} seconds");
        }

        Ok(())
    }

    fn validate_output(&self) -> anyhow::Result<()> {
        if self.output.directory.as_os_str().is_empty() {
            anyhow::bail!("output.directory must not be empty");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let Some(ref telemetry) = self.telemetry else {
            return Ok(());
        };

        let rate = telemetry.sampling_rate();
        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0.0 and 1.0, got {rate}");
        }

        Ok(())
    }
}
