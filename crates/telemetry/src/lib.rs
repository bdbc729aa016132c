//! Logging and tracing bootstrap for FOLIO.

use folio_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing/logging pipeline from telemetry settings.
///
/// `RUST_LOG` takes precedence; otherwise the configured filter applies,
/// falling back to `info`. Repeated calls are ignored so tests can init
/// freely.
pub fn init(settings: &TelemetrySettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(settings.filter.as_deref().unwrap_or("info"))
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match settings.log_format {
        LogFormat::Pretty => builder.pretty().try_init().ok(),
        LogFormat::Json => builder.json().try_init().ok(),
    };

    tracing::debug!(target: "folio-telemetry", "telemetry initialized");
}
