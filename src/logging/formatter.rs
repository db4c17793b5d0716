use tracing_subscriber::{
    fmt::{self, MakeWriter},
    registry::LookupSpan,
    Layer,
};

use crate::logging::config::LogFormat;

/// Строит fmt-layer нужного формата поверх произвольного writer.
///
/// Конкретный тип формата стирается в boxed trait-объект, чтобы консольный
/// и файловый sink складывались в один `Vec`.
pub fn build_formatter<S, W>(
    format: LogFormat,
    with_ansi: bool,
    writer: W,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(writer)
            .with_ansi(with_ansi)
            .with_target(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(writer)
            .with_ansi(with_ansi)
            .with_target(true)
            .boxed(),
    }
}
