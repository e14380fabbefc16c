//!
//! Setup logging subsystem.
//!

use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::config::{Log, LogFormat};

/// Crates whose events pass the default filter
const WATCHED_CRATES: [&str; 3] = ["epp_response_mapper", "epp_models", "common_utils"];

/// Installs the global subscriber described by `config`.
///
/// Fails when a global subscriber is already set, e.g. by the embedding
/// application.
pub fn setup(config: &Log) -> Result<(), tracing_subscriber::util::TryInitError> {
    let console = &config.console;

    let console_layer = console.enabled.then(|| {
        let filter = console
            .filtering_directive
            .as_deref()
            .map(EnvFilter::new)
            .unwrap_or_else(|| default_filter(console.level.into_level()));

        match console.log_format {
            LogFormat::Default => fmt::layer().with_target(true).with_filter(filter).boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_filter(filter)
                .boxed(),
        }
    });

    tracing_subscriber::registry().with(console_layer).try_init()
}

fn default_filter(level: tracing::Level) -> EnvFilter {
    let directives = WATCHED_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}
