//! Дамп индекса: сериализация арены и восстановление таблицы слотов.
//!
//! ## Формат
//!
//! Все целые — little-endian:
//!
//! ```text
//! u16  n_entries            // живые записи + 1
//! повторить n_entries - 1 раз:
//!   u64  key
//!   u64  value
//! ```
//!
//! Записи идут в порядке арены (порядке вставки). Таблица слотов в дамп не
//! попадает: при чтении она строится заново повторной вставкой каждой записи,
//! так что загруженная раскладка всегда корректна, даже если дамп писался с
//! другой парой хеш-функций.
//!
//! ```no_run
//! use small_cuckoo::{engine::dump::{load_from_path, save_to_path}, SmallCuckoo};
//!
//! let mut index = SmallCuckoo::new(0);
//! index.insert(1, 10);
//! save_to_path(&index, "index.cuckoo")?;
//!
//! let restored = load_from_path("index.cuckoo")?;
//! assert_eq!(restored.find(1), Some(10));
//! # Ok::<(), small_cuckoo::StackError>(())
//! ```
//!
//! ## Модули
//!
//! - [`encode`] — запись дампа в `std::io::Write`
//! - [`decode`] — чтение дампа из `std::io::Read`
//! - [`file`] — сохранение и загрузка через файловую систему

pub mod decode;
pub mod encode;
pub mod file;

pub use decode::*;
pub use encode::*;
pub use file::*;

/// Размер заголовка (`n_entries`) в байтах.
pub const HEADER_LEN: usize = 2;

/// Размер одной записи (`key` + `value`) в байтах.
pub const ENTRY_LEN: usize = 16;
