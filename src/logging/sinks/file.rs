use std::fs;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling::daily};
use tracing_subscriber::{registry::LookupSpan, Layer};

use crate::logging::{
    config::{FileSinkConfig, LogFormat},
    formatter,
};

/// Файловый layer с ежедневной ротацией. Запись идёт через фоновый поток;
/// `WorkerGuard` нужно держать живым, пока логирование используется.
pub fn layer_with_config<S>(
    config: &FileSinkConfig,
    format: LogFormat,
) -> std::io::Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard)>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fs::create_dir_all(&config.dir)?;

    let file_appender = daily(&config.dir, &config.prefix);
    let (non_blocking_writer, guard) = non_blocking(file_appender);

    // В файл цвета не пишем
    let layer = formatter::build_formatter(format, false, non_blocking_writer);

    Ok((layer, guard))
}
