//! Span exporter writing OTLP JSON lines to a rotating file.

use super::file_writer::RotatingFile;
use super::span_formatter::OtlpEncoder;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes each exported batch as one JSON line.
#[derive(Debug)]
struct JsonFileExporter {
    file: RotatingFile,
    encoder: OtlpEncoder,
    shut_down: bool,
}

impl SpanExporter for JsonFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.shut_down {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }
}

/// Builds a tracer provider exporting synchronously to `path`.
///
/// The plugin runs single-threaded in WASM, so spans are exported as they end
/// rather than batched on a background runtime.
pub fn file_tracer_provider(path: PathBuf, resource: Resource, scope: &'static str) -> TracerProvider {
    let exporter = JsonFileExporter {
        file: RotatingFile::new(path),
        encoder: OtlpEncoder::new(resource.clone(), scope),
        shut_down: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
