//! Tracer provider whose exporter appends OTLP JSON lines to a local file.

use super::file_writer::{FileWriter, RotationPolicy};
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Instrumentation scope recorded on every exported batch.
pub const SCOPE_NAME: &str = "Navrail";

#[derive(Debug)]
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    closed: AtomicBool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.closed.load(Ordering::SeqCst) {
            Err(TraceError::from("file exporter already shut down"))
        } else {
            let line = self.formatter.format_batch(&batch).to_string();
            self.writer
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    // Resource is fixed at construction.
    fn set_resource(&mut self, _resource: &Resource) {}
}

/// Builds a provider that exports each finished span synchronously to `path`.
pub fn create_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        writer: FileWriter::new(path, RotationPolicy::default()),
        formatter: SpanFormatter::new(resource.clone(), SCOPE_NAME),
        closed: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
