use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки формата дампа индекса.
///
/// Ошибки ввода-вывода (короткое чтение/запись) сюда не попадают: они
/// приходят как `std::io::Error` и конвертируются в `StackError` напрямую.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DumpError {
    /// Повреждённые данные в дампе
    #[error("Corrupted index dump{}: {reason}", fmt_offset(*.offset))]
    CorruptedData { reason: String, offset: Option<u64> },

    /// После последней записи остались лишние байты
    #[error("Trailing bytes after index dump: expected {expected} bytes, got {got}")]
    TrailingBytes { expected: u64, got: u64 },
}

fn fmt_offset(offset: Option<u64>) -> String {
    offset.map(|o| format!(" at offset {o}")).unwrap_or_default()
}

impl ErrorExt for DumpError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CorruptedData { .. } => StatusCode::CorruptedData,
            Self::TrailingBytes { .. } => StatusCode::DeserializationFailed,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
