//! Subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the data directory.
pub const TRACE_FILE: &str = "cinefind-otlp.json";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` in front of an OpenTelemetry layer exporting to
/// `<data dir>/cinefind-otlp.json`.
///
/// Tracing is best effort. If the data directory cannot be created, or the
/// level directive does not parse, or a subscriber is already installed,
/// the plugin runs without traces.
pub fn init_tracing(config: &Config) {
    let Ok(filter) = EnvFilter::try_new(&config.trace_level) else {
        return;
    };

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "cinefind"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::file_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let tracer = provider.tracer("cinefind");

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
