use tracing_subscriber::EnvFilter;

use crate::logging::config::LoggingConfig;

/// Собирает фильтр: `RUST_LOG`, если задан, иначе директива из конфигурации.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, String> {
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => Ok(env_filter),
        Err(_) => build_filter_from_directive(&config.level),
    }
}

pub(crate) fn build_filter_from_directive(directive: &str) -> Result<EnvFilter, String> {
    EnvFilter::try_new(directive)
        .map_err(|e| format!("Invalid log level directive '{directive}': {e}"))
}
