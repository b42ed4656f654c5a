//! Metric name constants and recording helpers

use std::time::Instant;

use opentelemetry::{
    global,
    metrics::{Histogram, Meter},
};

/// Instrumentation scope for every VoiceTech instrument
pub const METER_NAME: &str = "voicetech";

// Synthesis metric names
pub const TTS_SYNTHESIS_DURATION: &str = "tts.synthesis.duration";
pub const TTS_SYNTHESIS_COUNT: &str = "tts.synthesis.count";
pub const TTS_AUDIO_SECONDS: &str = "tts.audio.seconds";

/// Meter backed by the global provider
///
/// Instruments created before [`crate::init`] installs an OTLP provider, or
/// when none is configured, record into a no-op.
pub fn meter() -> Meter {
    global::meter(METER_NAME)
}

/// Record a duration measurement on a histogram
pub fn record_duration(histogram: &Histogram<f64>, start: Instant, attributes: &[opentelemetry::KeyValue]) {
    histogram.record(start.elapsed().as_secs_f64(), attributes);
}
