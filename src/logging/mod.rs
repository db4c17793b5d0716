//! Логирование на `tracing`.
//!
//! Библиотека сама ничего не инициализирует: она только эмитит события
//! (`debug!` при росте таблицы и загрузке дампа, `trace!` на неудачном
//! вытеснении, `error!` перед аварийным завершением). Приложение вызывает
//! [`init_logging`] один раз при старте или ставит свой subscriber.

pub mod config;
mod filters;
mod formatter;
pub mod handle;
pub mod sinks;

pub use config::{FileSinkConfig, LogFormat, LoggingConfig};
pub use handle::LoggingHandle;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer, Registry};

/// Собирает subscriber по конфигурации, не устанавливая его глобально.
pub fn build_subscriber(
    config: &LoggingConfig
) -> Result<
    (
        impl tracing::Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
        Option<WorkerGuard>,
    ),
    Box<dyn std::error::Error>,
> {
    config.validate()?;

    let env_filter = filters::build_filter(config)?;
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    // Console layer
    if config.console {
        layers.push(sinks::console::layer_with_config(config));
    }

    // File layer
    let file_guard = match &config.file {
        Some(file) => {
            let (file_layer, guard) = sinks::file::layer_with_config(file, config.format)?;
            layers.push(file_layer);
            Some(guard)
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(layers)
        .with(env_filter);

    Ok((subscriber, file_guard))
}

/// Инициализация логирования с конфигурацией.
///
/// Повторный вызов в том же процессе возвращает ошибку: глобальный
/// subscriber уже установлен.
pub fn init_logging(config: LoggingConfig) -> Result<LoggingHandle, Box<dyn std::error::Error>> {
    let (subscriber, file_guard) = build_subscriber(&config)?;
    subscriber.try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        format = ?config.format,
        console_enabled = config.console,
        file_enabled = config.file.is_some(),
        "Logging system initialized"
    );

    Ok(LoggingHandle::new(file_guard))
}
