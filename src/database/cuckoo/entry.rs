//! Плотная арена записей.
//!
//! Записи хранятся в порядке вставки и никогда не изменяются. Позиция `0`
//! занята служебной записью, поэтому первая настоящая запись получает
//! индекс `1`, а `n_entries` совпадает с длиной вектора.

use super::slot::{EntryIndex, MAX_ENTRIES};

/// Пара ключ-значение фиксированной ширины.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Entry {
    pub key: u64,
    pub value: u64,
}

/// Арена записей с 1-based индексацией.
///
/// **ИНВАРИАНТЫ:**
///
/// - `1 <= n_entries() <= capacity()`
/// - `n_entries() - 1` — число живых записей, не больше [`MAX_ENTRIES`]
/// - `capacity()` растёт только удвоением, когда очередная запись не
///   помещается
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryArena {
    entries: Vec<Entry>,
    capacity: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl EntryArena {
    /// Создаёт арену ёмкостью `capacity` позиций (включая служебную).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = Vec::with_capacity(capacity);
        entries.push(Entry::default());
        Self { entries, capacity }
    }

    /// Граница «на единицу за последней занятой позицией».
    #[inline]
    pub fn n_entries(&self) -> usize {
        self.entries.len()
    }

    /// Число живых записей.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Выделенная ёмкость в позициях.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Добавляет запись в конец и возвращает её индекс.
    ///
    /// Возвращает `None`, если все 16-битные индексы уже выданы; арена при
    /// этом не меняется.
    pub fn push(
        &mut self,
        entry: Entry,
    ) -> Option<EntryIndex> {
        if self.len() >= MAX_ENTRIES {
            return None;
        }
        let index = EntryIndex::new(self.entries.len())?;

        if self.entries.len() + 1 > self.capacity {
            self.capacity <<= 1;
            self.entries
                .reserve_exact(self.capacity - self.entries.len());
        }
        self.entries.push(entry);

        Some(index)
    }

    /// Запись по индексу.
    #[inline]
    pub fn get(
        &self,
        index: EntryIndex,
    ) -> &Entry {
        &self.entries[index.get()]
    }

    /// Живые записи в порядке вставки (без служебной позиции).
    #[inline]
    pub fn live(&self) -> &[Entry] {
        &self.entries[1..]
    }

    /// Индексы всех живых записей по возрастанию.
    pub fn indices(&self) -> impl Iterator<Item = EntryIndex> + '_ {
        (1..self.entries.len()).filter_map(EntryIndex::new)
    }
}
