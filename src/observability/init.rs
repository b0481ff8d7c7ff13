//! Subscriber installation for the plugin and worker threads.

use super::tracer::{self, SCOPE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "navrail-otlp.json";

/// Installs the global subscriber, exporting spans to the plugin data directory.
///
/// The filter comes from `trace_level` in the plugin configuration and falls
/// back to `"info"`. Tracing is best effort: when the data directory cannot be
/// created the plugin runs without a subscriber. Repeated calls are no-ops.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    init_tracing_in(&crate::infrastructure::paths::get_data_dir(), level);
}

/// Installs the global subscriber writing to `dir`.
pub fn init_tracing_in(dir: &Path, level: &str) {
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SCOPE_NAME)]);
    let provider = tracer::create_tracer_provider(dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
