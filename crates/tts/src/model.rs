pub mod placeholder;

use std::sync::Arc;

use voicetech_config::ModelConfig;

use crate::{error::Result, validation::ValidatedRequest};

pub use placeholder::PlaceholderModel;

/// Mono audio produced by a model
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples in `[-1.0, 1.0]`
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Waveform {
    /// Length in seconds
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// Frame-major mel-spectrogram
#[derive(Debug, Clone, PartialEq)]
pub struct MelSpectrogram {
    mel_bins: usize,
    values: Vec<f32>,
}

impl MelSpectrogram {
    /// Wrap frame-major values; `values.len()` must be a multiple of `mel_bins`
    pub fn new(mel_bins: usize, values: Vec<f32>) -> Self {
        debug_assert!(mel_bins > 0 && values.len() % mel_bins == 0);
        Self { mel_bins, values }
    }

    pub fn frames(&self) -> usize {
        self.values.len() / self.mel_bins
    }

    pub const fn mel_bins(&self) -> usize {
        self.mel_bins
    }

    pub fn frame(&self, index: usize) -> &[f32] {
        &self.values[index * self.mel_bins..(index + 1) * self.mel_bins]
    }
}

/// A text-to-speech model
///
/// Implementations are CPU-bound and called from a blocking thread.
pub trait SpeechModel: Send + Sync {
    /// Model identifier
    fn name(&self) -> &str;

    /// Device the model runs on
    fn device(&self) -> &str;

    /// Number of trainable parameters
    fn parameter_count(&self) -> usize;

    /// Produce audio for a validated request
    fn synthesize(&self, request: &ValidatedRequest) -> Result<Waveform>;
}

/// Outcome of model initialization at startup
///
/// Handed to request handlers through application state; an unavailable
/// model makes synthesis answer 503 while the rest of the API keeps serving.
#[derive(Clone)]
pub enum ModelState {
    Loaded(Arc<dyn SpeechModel>),
    Unavailable { reason: String },
}

impl ModelState {
    /// Build the configured model
    pub fn initialize(config: &ModelConfig) -> Self {
        if !config.enabled {
            tracing::warn!("TTS model disabled by configuration");
            return Self::Unavailable {
                reason: "model disabled by configuration".to_string(),
            };
        }

        tracing::info!("Loading TTS model...");

        match PlaceholderModel::new(config) {
            Ok(model) => {
                tracing::info!(
                    device = %config.device,
                    parameters = model.parameter_count(),
                    "Model loaded successfully"
                );
                Self::Loaded(Arc::new(model))
            }
            Err(e) => {
                tracing::error!("Failed to load model: {e}");
                Self::Unavailable { reason: e.to_string() }
            }
        }
    }

    pub fn model(&self) -> Option<&Arc<dyn SpeechModel>> {
        match self {
            Self::Loaded(model) => Some(model),
            Self::Unavailable { .. } => None,
        }
    }

    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(model) => f.debug_tuple("Loaded").field(&model.name()).finish(),
            Self::Unavailable { reason } => f.debug_struct("Unavailable").field("reason", reason).finish(),
        }
    }
}
