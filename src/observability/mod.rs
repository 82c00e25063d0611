//! OpenTelemetry tracing exported to a local JSON file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer → JsonFileExporter → zearch-otlp.json
//! ```
//!
//! The plugin cannot reach a collector from the sandbox, so spans are written
//! as OTLP JSON lines to `~/.local/share/zellij/zearch/zearch-otlp.json`
//! (rotated at 10 MiB, three backups). The filter comes from the
//! `trace_level` option and defaults to `info`.

mod exporter;
mod file_writer;
mod init;
mod span_formatter;

pub use file_writer::RotatingFile;
pub use init::{build_filter, init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME};
