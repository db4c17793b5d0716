use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Формат вывода событий.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Многострочный, для разработки
    Pretty,
    /// Одна строка на событие
    #[default]
    Compact,
    /// JSON, одна строка на событие
    Json,
}

/// Файловый sink: ежедневно ротируемые файлы `<dir>/<prefix>.YYYY-MM-DD`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileSinkConfig {
    pub dir: PathBuf,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Конфигурация логирования.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Директива `EnvFilter` (например `"info"` или
    /// `"small_cuckoo=debug"`). `RUST_LOG` имеет приоритет.
    pub level: String,
    pub format: LogFormat,
    /// Писать ли в stderr
    pub console: bool,
    /// ANSI-цвета в консоли
    pub ansi: bool,
    pub file: Option<FileSinkConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            console: true,
            ansi: true,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Проверяет директиву фильтра и наличие хотя бы одного sink.
    pub fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.level)
            .map_err(|e| format!("Invalid log level directive '{}': {e}", self.level))?;
        if !self.console && self.file.is_none() {
            return Err("Logging has no sinks: enable console or file".to_string());
        }
        if let Some(file) = &self.file {
            if file.prefix.is_empty() {
                return Err("Log file prefix must not be empty".to_string());
            }
        }
        Ok(())
    }
}

fn default_prefix() -> String {
    "small-cuckoo.log".to_string()
}
