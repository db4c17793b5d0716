//! Индексы арены и слоты таблицы.
//!
//! Записи арены адресуются 16-битными индексами, а индекс `0` зарезервирован
//! под «пусто». Вместо магического нуля используется [`EntryIndex`] поверх
//! `NonZeroU16`: `Option<EntryIndex>` занимает те же два байта, что и сырой
//! `u16`, поэтому таблица слотов сохраняет плотную раскладку.

use std::num::NonZeroU16;

/// Максимальное число живых записей: индексы `1..=65534`, `0` — пустой слот.
pub const MAX_ENTRIES: usize = u16::MAX as usize - 1;

/// Ненулевой индекс записи в арене.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryIndex(NonZeroU16);

/// Один слот таблицы: `None` — пусто, иначе индекс записи в арене.
pub type Slot = Option<EntryIndex>;

impl EntryIndex {
    /// Строит индекс из позиции в арене. Возвращает `None` для нуля и для
    /// позиций, не помещающихся в 16 бит.
    pub fn new(position: usize) -> Option<Self> {
        u16::try_from(position)
            .ok()
            .and_then(NonZeroU16::new)
            .map(EntryIndex)
    }

    /// Позиция в арене.
    #[inline]
    pub fn get(self) -> usize {
        self.0.get() as usize
    }
}
