//! Distributed tracing across the two services.
//!
//! Spans are exported over OTLP/HTTP when `[telemetry]` is enabled. The W3C
//! `traceparent` header links the input service's outbound call to the
//! orchestration service's request span, so one lookup yields one trace.

use crate::config::TelemetryConfig;
use crate::utils::error::{Result, ServiceError};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::propagation::{Extractor, Injector, TextMapPropagator};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, Context};
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{SdkTracerProvider, Tracer};
use opentelemetry_sdk::Resource;
use tracing::Span;
use tracing_opentelemetry::{OpenTelemetryLayer, OpenTelemetrySpanExt};
use tracing_subscriber::Registry;

pub const TRACEPARENT: &str = "traceparent";

pub type OtelLayer = OpenTelemetryLayer<Registry, Tracer>;

struct HeadersExtractor<'a>(&'a HeaderMap);

impl Extractor for HeadersExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

struct HeadersInjector<'a>(&'a mut HeaderMap);

impl Injector for HeadersInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let (Ok(name), Ok(val)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            self.0.insert(name, val);
        }
    }
}

/// Writes the trace context of the current span into `headers`.
///
/// Nothing is written when no OpenTelemetry layer is installed, since the
/// current span then carries no valid span context.
pub fn inject_current_context(headers: &mut HeaderMap) {
    let cx = Span::current().context();
    TraceContextPropagator::new().inject_context(&cx, &mut HeadersInjector(headers));
}

/// Reads the remote trace context carried by `headers`.
pub fn extract_context(headers: &HeaderMap) -> Context {
    TraceContextPropagator::new().extract(&HeadersExtractor(headers))
}

/// Makes the caller's span (from `traceparent`) the parent of `span`.
pub fn set_parent_from_headers(span: &Span, headers: &HeaderMap) {
    if headers.contains_key(TRACEPARENT) {
        let _ = span.set_parent(extract_context(headers));
    }
}

/// Builds the span exporter pipeline for `service_name`.
///
/// The returned provider must be shut down on exit so buffered spans are
/// flushed.
pub fn init_tracer_provider(service_name: &str, config: &TelemetryConfig) -> Result<SdkTracerProvider> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(config.otlp_endpoint.as_str())
        .build()
        .map_err(|e| ServiceError::TelemetryError {
            message: format!("cannot build OTLP exporter for {}: {}", config.otlp_endpoint, e),
        })?;

    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider.clone());
    Ok(provider)
}

/// Layer bridging `tracing` spans into `provider`.
pub fn otel_layer(provider: &SdkTracerProvider, service_name: &str) -> OtelLayer {
    tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name.to_string()))
}

/// Flushes buffered spans and stops the exporter.
pub fn shutdown_tracer_provider(provider: SdkTracerProvider) {
    if let Err(e) = provider.shutdown() {
        tracing::warn!(error = %e, "Tracer provider shutdown failed");
    }
}
