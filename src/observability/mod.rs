//! OpenTelemetry tracing with a file-based OTLP exporter.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → navrail-otlp.json
//! ```
//!
//! Spans land in `~/.local/share/zellij/navrail/navrail-otlp.json` as one OTLP
//! JSON document per line. The file rotates by size and keeps a couple of old
//! copies. The level is taken from the `trace_level` plugin option.
//!
//! ```rust,no_run
//! use navrail::observability::init_tracing;
//! use navrail::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin loaded");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, init_tracing_in, TRACE_FILE_NAME};
