use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки вставки в индекс, возвращаемые `try_insert` вместо аварийного
/// завершения.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Все 16-битные индексы арены уже заняты.
    #[error("Index is full: {attempted} live entries requested, limit is {limit}")]
    CapacityExceeded { limit: usize, attempted: usize },

    /// Ключ уже присутствует (обновление на месте не поддерживается).
    #[error("Key {key:#018x} is already present")]
    DuplicateKey { key: u64 },

    /// Вытеснение не сходится даже на максимальном размере таблицы слотов.
    #[error("Displacement did not converge at table size {table_size}")]
    NoConvergence { table_size: usize },
}

impl ErrorExt for IndexError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CapacityExceeded { .. } => StatusCode::SizeLimit,
            Self::DuplicateKey { .. } => StatusCode::AlreadyExists,
            Self::NoConvergence { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
