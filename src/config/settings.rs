use std::path::Path;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::{HashScheme, KeyMixing, SecondHash, DEFAULT_MAX_LOOPS, MAX_ENTRIES};

/// Ошибки загрузки настроек.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("max_loops must be at least 1")]
    ZeroLoops,

    #[error("initial_capacity {got} exceeds the entry limit {limit}")]
    CapacityTooLarge { got: usize, limit: usize },
}

/// Настройки создания индекса.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuckooSettings {
    /// Подсказка ёмкости для новых индексов.
    pub initial_capacity: usize,
    /// Раунды вытеснения перед удвоением таблицы.
    pub max_loops: usize,
    /// Сколько байт ключа читает первая хеш-функция.
    pub key_mixing: KeyMixing,
    /// Вторая хеш-функция.
    pub second_hash: SecondHash,
}

impl Default for CuckooSettings {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            max_loops: DEFAULT_MAX_LOOPS,
            key_mixing: KeyMixing::default(),
            second_hash: SecondHash::default(),
        }
    }
}

impl CuckooSettings {
    /// Загружает настройки из файла (формат по расширению). Поля, которых
    /// нет в файле, получают значения по умолчанию.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings: Self = Config::builder()
            // Значения по умолчанию
            .set_default("initial_capacity", 0i64)?
            .set_default("max_loops", DEFAULT_MAX_LOOPS as i64)?
            .set_default("key_mixing", "compat")?
            .set_default("second_hash", "crc32c")?
            .add_source(File::from(path.as_ref()).required(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Проверяет значения, которые не выражаются типами.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_loops == 0 {
            return Err(SettingsError::ZeroLoops);
        }
        if self.initial_capacity > MAX_ENTRIES {
            return Err(SettingsError::CapacityTooLarge {
                got: self.initial_capacity,
                limit: MAX_ENTRIES,
            });
        }
        Ok(())
    }

    pub fn hash_scheme(&self) -> HashScheme {
        HashScheme::new(self.key_mixing, self.second_hash)
    }
}
