//! Две независимые хеш-функции для таблицы слотов.
//!
//! `h1` всегда адресует чётные слоты, `h2` — нечётные, поэтому каждая
//! функция распределяет ключи по своей половине таблицы. Ключ хешируется по
//! своему little-endian представлению, размещение не зависит от платформы.
//!
//! - `h1`: мультипликативный хеш Ларсона (Per-Ake Larson, "Dynamic Hash
//!   Tables", CACM 31(4), 1988).
//! - `h2`: CRC-32C (тот же результат, что и у инструкции `crc32` из SSE4.2)
//!   либо `hashword` Боба Дженкинса (lookup3).

use serde::{Deserialize, Serialize};

/// Сколько байт ключа подмешивает `h1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMixing {
    /// Первые 7 байт: старший байт ключа в хеш не попадает, ключи,
    /// отличающиеся только им, конкурируют за один чётный слот.
    #[default]
    Compat,
    /// Все 8 байт.
    Full,
}

/// Реализация второй хеш-функции.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondHash {
    #[default]
    Crc32c,
    Jenkins,
}

/// Пара хеш-функций, которой пользуется таблица.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HashScheme {
    #[serde(default)]
    pub mixing: KeyMixing,
    #[serde(default)]
    pub second: SecondHash,
}

const LARSON_SEED: u32 = 0xdead_beef;
const LARSON_MULTIPLIER: u32 = 101;

const JENKINS_INITVAL: u32 = 0x5555_5555;

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl HashScheme {
    pub const fn new(
        mixing: KeyMixing,
        second: SecondHash,
    ) -> Self {
        Self { mixing, second }
    }

    /// Чётный слот-кандидат для `key` в таблице из `table_size` слотов.
    #[inline]
    pub fn h1(
        &self,
        table_size: usize,
        key: u64,
    ) -> usize {
        (fold(larson(key, self.mixing)) & half_mask(table_size)) << 1
    }

    /// Нечётный слот-кандидат для `key` в таблице из `table_size` слотов.
    #[inline]
    pub fn h2(
        &self,
        table_size: usize,
        key: u64,
    ) -> usize {
        let h = match self.second {
            SecondHash::Crc32c => crc32c_raw(key),
            SecondHash::Jenkins => jenkins(key),
        };
        1 + ((fold(h) & half_mask(table_size)) << 1)
    }
}

/// Маска для половины таблицы; `table_size` — степень двойки не меньше 2.
#[inline]
fn half_mask(table_size: usize) -> usize {
    debug_assert!(table_size.is_power_of_two() && table_size >= 2);
    (table_size >> 1) - 1
}

/// Сворачивает старшие 16 бит в младшие. Результат остаётся 32-битным: для
/// таблиц меньше 2^17 слотов это совпадает с усечением до `u16`, начиная с
/// 2^17 старшие биты продолжают различать ключи.
#[inline]
fn fold(h: u32) -> usize {
    (h ^ (h >> 16)) as usize
}

fn larson(
    key: u64,
    mixing: KeyMixing,
) -> u32 {
    let bytes = key.to_le_bytes();
    let used = match mixing {
        KeyMixing::Compat => &bytes[..7],
        KeyMixing::Full => &bytes[..],
    };
    used.iter().fold(LARSON_SEED, |h, &b| {
        h.wrapping_mul(LARSON_MULTIPLIER).wrapping_add(b as u32)
    })
}

/// CRC-32C с начальным значением `!0` и без финальной инверсии.
///
/// `crc32c::crc32c` инвертирует результат, поэтому здесь инверсия снимается.
fn crc32c_raw(key: u64) -> u32 {
    !crc32c::crc32c(&key.to_le_bytes())
}

/// `hashword` из lookup3 для ключа из двух 32-битных слов.
fn jenkins(key: u64) -> u32 {
    let init = 0xdead_beef_u32
        .wrapping_add(2 << 2)
        .wrapping_add(JENKINS_INITVAL);
    let mut a = init.wrapping_add(key as u32);
    let mut b = init.wrapping_add((key >> 32) as u32);
    let mut c = init;

    c ^= b;
    c = c.wrapping_sub(b.rotate_left(14));
    a ^= c;
    a = a.wrapping_sub(c.rotate_left(11));
    b ^= a;
    b = b.wrapping_sub(a.rotate_left(25));
    c ^= b;
    c = c.wrapping_sub(b.rotate_left(16));
    a ^= c;
    a = a.wrapping_sub(c.rotate_left(4));
    b ^= a;
    b = b.wrapping_sub(a.rotate_left(14));
    c ^= b;
    c = c.wrapping_sub(b.rotate_left(24));

    c
}

/// Оценка качества распределения по корзинам (Aho, Sethi, Ullman,
/// "Compilers", §7.6).
///
/// Равномерно случайное распределение даёт значение около 1.0; заметно
/// большие значения означают скопления ключей в отдельных слотах.
pub fn evaluate_hash_quality(buckets: &[u64]) -> f64 {
    let n = buckets.len() as f64;
    let sum: f64 = buckets
        .iter()
        .map(|&b| b as f64 * (b as f64 + 1.0) / 2.0)
        .sum();
    sum / (1.5 * n - 0.5)
}
