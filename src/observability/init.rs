//! Subscriber setup: `tracing` spans → OpenTelemetry → JSON trace file.

use super::exporter;
use crate::{Config, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name recorded on every span.
pub const SERVICE_NAME: &str = "Zearch";

/// Filter used when `trace_level` is absent or not a valid directive.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Builds the span filter from the configured `trace_level`.
///
/// Accepts anything `EnvFilter` understands, e.g. `debug` or
/// `zearch::app=trace,info`.
#[must_use]
pub fn build_filter(trace_level: Option<&str>) -> EnvFilter {
    trace_level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

/// Installs the global subscriber writing to `<data dir>/zearch-otlp.json`.
///
/// Calling this twice keeps the first subscriber.
///
/// # Errors
///
/// Returns [`ZearchError::Io`] if the data directory cannot be created. The
/// plugin keeps running without tracing in that case.
///
/// [`ZearchError::Io`]: crate::ZearchError::Io
pub fn init_tracing(config: &Config) -> Result<()> {
    let trace_file = crate::infrastructure::trace_file();
    if let Some(dir) = trace_file.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::file_tracer_provider(trace_file, resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(build_filter(config.trace_level.as_deref()))
        .with(otel_layer)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_falls_back_to_default() {
        let default = EnvFilter::new(DEFAULT_TRACE_LEVEL).to_string();
        assert_eq!(build_filter(Some("zearch=notalevel")).to_string(), default);
        assert_eq!(build_filter(None).to_string(), default);
        assert_eq!(build_filter(Some("debug")).to_string(), EnvFilter::new("debug").to_string());
    }
}
