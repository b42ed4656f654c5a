use std::{sync::Arc, time::Instant};

use voicetech_telemetry::{Counter, Histogram, KeyValue, metrics};

use crate::{
    artifact::{ArtifactStore, AudioFile},
    error::{Result, TtsError},
    model::{ModelState, SpeechModel},
    types::{Endpoint, SynthesisRequest, SynthesisResult},
};

/// Characters of input text included in the per-call log line
const LOGGED_TEXT_CHARS: usize = 50;

/// Synthesis service shared by all request handlers
pub struct Server {
    model: ModelState,
    store: ArtifactStore,
    device: String,
    metrics: SynthesisMetrics,
}

impl Server {
    /// Whether the model initialized at startup
    pub const fn model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    /// Configured device label
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Parameter count of the loaded model, 0 when unavailable
    pub fn parameter_count(&self) -> usize {
        self.model.model().map_or(0, |model| model.parameter_count())
    }

    /// Validate a request, run the model, and persist the audio
    ///
    /// Model availability is checked before the request is validated.
    pub async fn synthesize(&self, request: SynthesisRequest, endpoint: Endpoint) -> Result<SynthesisResult> {
        let start = Instant::now();
        let result = self.run(request, endpoint).await;
        self.metrics.record(endpoint, &result, start);
        result
    }

    async fn run(&self, request: SynthesisRequest, endpoint: Endpoint) -> Result<SynthesisResult> {
        let model = Arc::clone(
            self.model
                .model()
                .ok_or_else(|| TtsError::ModelUnavailable("Model not loaded".to_string()))?,
        );

        let request = request.validate()?;

        // Normalized text is not yet an input to the model
        tracing::debug!(normalized_text = request.normalized_text(), "normalized input text");

        let language = request.language().code;
        let accent_id = request.accent_id();
        let style_id = request.style_id();
        let logged_text: String = request.text().chars().take(LOGGED_TEXT_CHARS).collect();

        let waveform = tokio::task::spawn_blocking(move || model.synthesize(&request))
            .await
            .map_err(|e| TtsError::SynthesisFailed(format!("inference task failed: {e}")))??;

        let artifact = self.store.save(endpoint.artifact_prefix(), waveform).await?;

        tracing::info!(
            language,
            accent_id,
            style_id,
            file = %artifact.file_name,
            "{}: {logged_text}...",
            endpoint.as_str()
        );

        Ok(SynthesisResult {
            status: "success",
            message: endpoint.success_message(),
            audio_url: format!("/audio/{}", artifact.file_name),
            duration: artifact.duration,
            language: language.to_string(),
            accent_id,
            style_id,
        })
    }

    /// Open a previously written artifact
    pub async fn open_audio(&self, file_name: &str) -> Result<AudioFile> {
        self.store.open(file_name).await
    }
}

/// Synthesis instruments on the global meter
struct SynthesisMetrics {
    duration: Histogram<f64>,
    count: Counter<u64>,
    audio_seconds: Histogram<f64>,
}

impl SynthesisMetrics {
    fn new() -> Self {
        let meter = metrics::meter();

        Self {
            duration: meter
                .f64_histogram(metrics::TTS_SYNTHESIS_DURATION)
                .with_unit("s")
                .with_description("Time to validate, synthesize and store one request")
                .build(),
            count: meter
                .u64_counter(metrics::TTS_SYNTHESIS_COUNT)
                .with_description("Synthesis requests by outcome")
                .build(),
            audio_seconds: meter
                .f64_histogram(metrics::TTS_AUDIO_SECONDS)
                .with_unit("s")
                .with_description("Length of synthesized audio")
                .build(),
        }
    }

    fn record(&self, endpoint: Endpoint, result: &Result<SynthesisResult>, start: Instant) {
        let mut attributes = vec![KeyValue::new("endpoint", endpoint.as_str())];

        match result {
            Ok(output) => {
                attributes.push(KeyValue::new("outcome", "success"));
                attributes.push(KeyValue::new("language", output.language.clone()));
                self.audio_seconds.record(output.duration, &attributes);
            }
            Err(e) => attributes.push(KeyValue::new("outcome", e.error_type().to_string())),
        }

        metrics::record_duration(&self.duration, start, &attributes);
        self.count.add(1, &attributes);
    }
}

/// Builder for constructing the synthesis server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a voicetech_config::Config,
    model: Option<Arc<dyn SpeechModel>>,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a voicetech_config::Config) -> Self {
        Self { config, model: None }
    }

    /// Serve with the given model instead of building one from configuration
    #[must_use]
    pub fn with_model(mut self, model: Arc<dyn SpeechModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn build(self) -> Result<Server> {
        let model = match self.model {
            Some(model) => ModelState::Loaded(model),
            None => ModelState::initialize(&self.config.model),
        };

        let store = ArtifactStore::new(self.config.output.directory.clone());

        tracing::debug!(
            output_dir = %store.directory().display(),
            model_loaded = model.is_loaded(),
            "TTS server initialized"
        );

        Ok(Server {
            model,
            store,
            device: self.config.model.device.clone(),
            metrics: SynthesisMetrics::new(),
        })
    }
}
