//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name.
const SERVICE_NAME: &str = "zpix";

/// Trace file written inside the data directory.
const TRACE_FILE: &str = "zpix-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: `EnvFilter` at `config.trace_level`
/// (default `"info"`) feeding an OpenTelemetry layer that exports to
/// `/host/.local/share/zellij/zpix/zpix-otlp.json`.
///
/// Tracing is best effort. If the data directory cannot be created the
/// plugin runs without a subscriber, and a second call is a no-op.
///
/// ```rust,no_run
/// use zpix::observability::init_tracing;
/// use zpix::Config;
///
/// let config = Config {
///     trace_level: Some("zpix=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider =
        tracer::create_tracer_provider(data_dir.join(TRACE_FILE), SERVICE_NAME, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
