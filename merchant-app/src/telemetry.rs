//! Tracing subscriber and OpenTelemetry exporter setup.

use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

const DEFAULT_FILTER: &str = "info,merchant_app=debug,merchant_hex=debug";
const SERVICE_NAME: &str = "merchant-service";

/// Owns the OTLP tracer provider. Call [`Telemetry::shutdown`] before exit
/// so batched spans are flushed.
pub struct Telemetry {
    provider: SdkTracerProvider,
}

impl Telemetry {
    /// Installs the global subscriber: env filter, console output in the
    /// requested format, and span export over OTLP/gRPC.
    pub fn init(format: LogFormat) -> anyhow::Result<Self> {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .build()?;
        let provider = SdkTracerProvider::builder()
            .with_batch_exporter(exporter)
            .build();
        global::set_tracer_provider(provider.clone());

        let otel = tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME));

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let (json, text) = match format {
            LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
            LogFormat::Text => (None, Some(tracing_subscriber::fmt::layer())),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(json)
            .with(text)
            .with(otel)
            .try_init()?;

        Ok(Self { provider })
    }

    pub fn shutdown(self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "failed to flush traces");
        }
    }
}
