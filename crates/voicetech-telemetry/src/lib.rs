//! Telemetry for VoiceTech
//!
//! Console logging via the `tracing` ecosystem, plus OpenTelemetry traces and
//! metrics when an OTLP exporter is configured

mod metadata;
pub mod metrics;

use std::time::Duration;

use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use voicetech_config::{
    TelemetryConfig,
    telemetry::{
        LogFormat,
        exporters::{ExportProtocol, ExporterConfig},
    },
};

// Re-export common OpenTelemetry types for metrics
pub use opentelemetry::{
    KeyValue,
    metrics::{Counter, Histogram, Meter},
};

/// Guard that ensures proper cleanup of telemetry resources on drop
#[derive(Default)]
pub struct TelemetryGuard {
    meter_provider: Option<SdkMeterProvider>,
    tracer_provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether OTLP export is active
    pub const fn is_exporting(&self) -> bool {
        self.tracer_provider.is_some()
    }

    /// Force flush all pending metrics immediately
    ///
    /// # Errors
    ///
    /// Returns an error if the meter provider fails to flush
    pub fn force_flush(&self) -> anyhow::Result<()> {
        if let Some(ref provider) = self.meter_provider {
            provider
                .force_flush()
                .map_err(|e| anyhow::anyhow!("failed to flush metrics: {e}"))?;
        }
        Ok(())
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.meter_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown meter provider: {e}");
        }
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown tracer provider: {e}");
        }
    }
}

/// Initialize telemetry from configuration
///
/// Installs the global `tracing` subscriber: an `EnvFilter` built from
/// `log_filter` (falling back to `info` when it does not parse), a console
/// layer in the configured format, and an OpenTelemetry layer when an
/// exporter is configured. Returns a guard that must be held for the
/// lifetime of the application.
///
/// # Errors
///
/// Returns an error if an OTLP exporter cannot be built or a global
/// subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str) -> anyhow::Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.map_or(LogFormat::Text, |c| c.log_format) {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed(),
    };

    let mut guard = TelemetryGuard::default();

    let otel_layer = match config.and_then(|c| c.exporter.as_ref().map(|exporter| (c, exporter))) {
        Some((telemetry_config, exporter)) => {
            let resource = metadata::build_resource(telemetry_config);

            let meter_provider = init_metrics(exporter, resource.clone())?;
            global::set_meter_provider(meter_provider.clone());
            guard.meter_provider = Some(meter_provider);

            let tracer_provider = init_tracer(telemetry_config, exporter, resource)?;
            let tracer = tracer_provider.tracer("voicetech");
            global::set_tracer_provider(tracer_provider.clone());
            guard.tracer_provider = Some(tracer_provider);

            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .with(otel_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

/// Initialize OTLP metrics export
fn init_metrics(
    exporter_config: &ExporterConfig,
    resource: opentelemetry_sdk::Resource,
) -> anyhow::Result<SdkMeterProvider> {
    use opentelemetry_otlp::{MetricExporter, WithExportConfig};
    use opentelemetry_sdk::metrics::PeriodicReader;

    let exporter = match exporter_config.protocol {
        ExportProtocol::Grpc => MetricExporter::builder()
            .with_tonic()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build gRPC metrics exporter: {e}"))?,
        ExportProtocol::HttpProto => MetricExporter::builder()
            .with_http()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP metrics exporter: {e}"))?,
    };

    let reader = PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(exporter_config.export_interval))
        .build();

    Ok(SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build())
}

/// Initialize OTLP trace export
fn init_tracer(
    config: &TelemetryConfig,
    exporter_config: &ExporterConfig,
    resource: opentelemetry_sdk::Resource,
) -> anyhow::Result<SdkTracerProvider> {
    use opentelemetry_otlp::{SpanExporter, WithExportConfig};

    let exporter = match exporter_config.protocol {
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build gRPC span exporter: {e}"))?,
        ExportProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP span exporter: {e}"))?,
    };

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(sampler(config))
        .with_batch_exporter(exporter)
        .build())
}

fn sampler(config: &TelemetryConfig) -> opentelemetry_sdk::trace::Sampler {
    use opentelemetry_sdk::trace::Sampler;

    let rate = config.sampling_rate();

    let sampler = if rate >= 1.0 {
        Sampler::AlwaysOn
    } else if rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(rate)
    };

    if config.tracing.as_ref().is_none_or(|t| t.parent_based) {
        Sampler::ParentBased(Box::new(sampler))
    } else {
        sampler
    }
}
