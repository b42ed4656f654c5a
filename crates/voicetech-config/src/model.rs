use serde::Deserialize;

/// Acoustic model configuration
///
/// Dimensions describe the placeholder network built at startup. Values that
/// cannot produce a model do not fail config loading; the service starts with
/// the model marked unavailable instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Load the model at startup
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Device label reported by the health endpoint
    #[serde(default = "default_device")]
    pub device: String,
    /// Token vocabulary size
    #[serde(default = "default_vocab_size")]
    pub vocab_size: usize,
    /// Width of the token, language, accent and style embeddings
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,
    /// Mel bins per spectrogram frame
    #[serde(default = "default_mel_bins")]
    pub mel_bins: usize,
    /// Spectrogram frames generated per request
    #[serde(default = "default_seq_len")]
    pub seq_len: usize,
    /// Waveform samples per spectrogram frame
    #[serde(default = "default_hop_length")]
    pub hop_length: usize,
    /// Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Seed for weight initialization; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            device: default_device(),
            vocab_size: default_vocab_size(),
            embedding_dim: default_embedding_dim(),
            mel_bins: default_mel_bins(),
            seq_len: default_seq_len(),
            hop_length: default_hop_length(),
            sample_rate: default_sample_rate(),
            seed: None,
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_device() -> String {
    "cpu".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_vocab_size() -> usize {
    500
}

#[allow(clippy::missing_const_for_fn)]
fn default_embedding_dim() -> usize {
    256
}

#[allow(clippy::missing_const_for_fn)]
fn default_mel_bins() -> usize {
    80
}

#[allow(clippy::missing_const_for_fn)]
fn default_seq_len() -> usize {
    150
}

#[allow(clippy::missing_const_for_fn)]
fn default_hop_length() -> usize {
    256
}

#[allow(clippy::missing_const_for_fn)]
fn default_sample_rate() -> u32 {
    22_050
}
