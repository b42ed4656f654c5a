//! Untrained acoustic model with a noise vocoder
//!
//! Stands in for a trained network. Weights are random, token ids are drawn
//! at random instead of being derived from the text, and the waveform is
//! uniform noise sized `frames × hop_length`. The conditioning path (language,
//! accent and style embeddings) is real, so the request contract can be
//! exercised end to end.

use rand::{Rng, SeedableRng, rngs::StdRng};
use voicetech_config::ModelConfig;

use super::{MelSpectrogram, SpeechModel, Waveform};
use crate::{
    error::{Result, TtsError},
    language::LANGUAGES,
    validation::{ACCENT_COUNT, STYLE_COUNT, ValidatedRequest},
};

/// Initial weights are drawn from `[-WEIGHT_SCALE, WEIGHT_SCALE)`
const WEIGHT_SCALE: f32 = 0.1;

/// Peak amplitude of the noise vocoder
const NOISE_AMPLITUDE: f32 = 0.5;

/// Lookup table of `rows × dim` vectors
struct Embedding {
    dim: usize,
    weights: Vec<f32>,
}

impl Embedding {
    fn random(rows: usize, dim: usize, rng: &mut impl Rng) -> Self {
        Self {
            dim,
            weights: random_weights(rows * dim, rng),
        }
    }

    fn row(&self, index: usize) -> &[f32] {
        &self.weights[index * self.dim..(index + 1) * self.dim]
    }
}

/// Dense `input → output` projection
struct Linear {
    output: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl Linear {
    fn random(input: usize, output: usize, rng: &mut impl Rng) -> Self {
        Self {
            output,
            weights: random_weights(input * output, rng),
            bias: random_weights(output, rng),
        }
    }

    fn forward_into(&self, input: &[f32], out: &mut Vec<f32>) {
        let start = out.len();
        out.extend_from_slice(&self.bias);

        for (i, &x) in input.iter().enumerate() {
            let row = &self.weights[i * self.output..(i + 1) * self.output];
            for (acc, &w) in out[start..].iter_mut().zip(row) {
                *acc += x * w;
            }
        }
    }
}

fn random_weights(len: usize, rng: &mut impl Rng) -> Vec<f32> {
    (0..len).map(|_| rng.random_range(-WEIGHT_SCALE..WEIGHT_SCALE)).collect()
}

/// Placeholder model built from [`ModelConfig`]
pub struct PlaceholderModel {
    device: String,
    vocab_size: usize,
    seq_len: usize,
    hop_length: usize,
    sample_rate: u32,
    tokens: Embedding,
    languages: Embedding,
    accents: Embedding,
    styles: Embedding,
    projection: Linear,
}

impl PlaceholderModel {
    /// Allocate and randomly initialize the network
    pub fn new(config: &ModelConfig) -> Result<Self> {
        require_positive("vocab_size", config.vocab_size)?;
        require_positive("embedding_dim", config.embedding_dim)?;
        require_positive("mel_bins", config.mel_bins)?;
        require_positive("seq_len", config.seq_len)?;
        require_positive("hop_length", config.hop_length)?;
        if config.sample_rate == 0 {
            return Err(TtsError::ConfigError("model.sample_rate must be greater than zero".to_string()));
        }

        let mut rng = config.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let dim = config.embedding_dim;

        Ok(Self {
            device: config.device.clone(),
            vocab_size: config.vocab_size,
            seq_len: config.seq_len,
            hop_length: config.hop_length,
            sample_rate: config.sample_rate,
            tokens: Embedding::random(config.vocab_size, dim, &mut rng),
            languages: Embedding::random(LANGUAGES.len(), dim, &mut rng),
            accents: Embedding::random(ACCENT_COUNT, dim, &mut rng),
            styles: Embedding::random(STYLE_COUNT, dim, &mut rng),
            projection: Linear::random(dim, config.mel_bins, &mut rng),
        })
    }

    /// Produce `seq_len` mel frames conditioned on language, accent and style
    ///
    /// Token ids are random; the request text does not reach this point.
    pub fn mel_spectrogram(&self, request: &ValidatedRequest, rng: &mut impl Rng) -> MelSpectrogram {
        let language = self.languages.row(request.language_index());
        let accent = self.accents.row(request.accent_id());
        let style = self.styles.row(request.style_id());

        let mut values = Vec::with_capacity(self.seq_len * self.projection.output);
        let mut hidden = vec![0.0; self.tokens.dim];

        for _ in 0..self.seq_len {
            let token = self.tokens.row(rng.random_range(0..self.vocab_size));

            for (d, h) in hidden.iter_mut().enumerate() {
                *h = token[d] + language[d] + accent[d] + style[d];
            }

            self.projection.forward_into(&hidden, &mut values);
        }

        MelSpectrogram::new(self.projection.output, values)
    }

    /// Turn mel frames into audio: `hop_length` noise samples per frame
    pub fn vocode(&self, mel: &MelSpectrogram, rng: &mut impl Rng) -> Waveform {
        let samples = (0..mel.frames() * self.hop_length)
            .map(|_| rng.random_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE))
            .collect();

        Waveform {
            samples,
            sample_rate: self.sample_rate,
        }
    }
}

impl SpeechModel for PlaceholderModel {
    fn name(&self) -> &str {
        "MultilingualTTS"
    }

    fn device(&self) -> &str {
        &self.device
    }

    fn parameter_count(&self) -> usize {
        [&self.tokens, &self.languages, &self.accents, &self.styles]
            .iter()
            .map(|e| e.weights.len())
            .sum::<usize>()
            + self.projection.weights.len()
            + self.projection.bias.len()
    }

    fn synthesize(&self, request: &ValidatedRequest) -> Result<Waveform> {
        let mut rng = rand::rng();
        let mel = self.mel_spectrogram(request, &mut rng);

        tracing::debug!(frames = mel.frames(), mel_bins = mel.mel_bins(), "generated mel-spectrogram");

        Ok(self.vocode(&mel, &mut rng))
    }
}

fn require_positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(TtsError::ConfigError(format!("model.{name} must be greater than zero")));
    }
    Ok(())
}
