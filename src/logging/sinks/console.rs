use tracing_subscriber::{registry::LookupSpan, Layer};

use crate::logging::{config::LoggingConfig, formatter};

/// Консольный layer: события пишутся в stderr, stdout остаётся приложению.
pub fn layer_with_config<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    formatter::build_formatter(config.format, config.ansi, std::io::stderr)
}
