//! Cuckoo-хеширование для небольших таблиц (Pagh, Rodler, "Cuckoo Hashing",
//! ESA 2001).
//!
//! Индекс состоит из двух массивов:
//!
//! - арена записей [`EntryArena`] — каноническое состояние, именно она
//!   попадает в дамп;
//! - таблица слотов — производное состояние из 16-битных индексов арены,
//!   которое всегда можно перестроить повторной вставкой всех записей.
//!
//! Чётные слоты адресуются первой хеш-функцией, нечётные — второй. Каждая
//! живая запись в любой момент лежит ровно в одном из двух своих
//! слотов-кандидатов, поэтому поиск проверяет не больше двух позиций.

use small_cuckoo_error::{bail, ensure, CuckooResult, IndexError};
use tracing::{debug, trace};

use super::{
    entry::{Entry, EntryArena},
    hash::HashScheme,
    iter::Iter,
    slot::{EntryIndex, Slot, MAX_ENTRIES},
};
use crate::{config::CuckooSettings, fatal::fatal};

/// Число раундов вытеснения перед удвоением таблицы. Раунд — обмен по `h1`,
/// затем обмен по `h2`.
pub const DEFAULT_MAX_LOOPS: usize = 20;

/// Предельный размер таблицы слотов. Если вытеснение не сходится и здесь,
/// дальнейшее удвоение не поможет.
pub const MAX_TABLE_SIZE: usize = 1 << 24;

/// Индекс `u64 -> u64` не более чем на [`MAX_ENTRIES`] записей.
///
/// **ИНВАРИАНТЫ:**
///
/// - `table_size()` — степень двойки, не меньше 2;
/// - для каждого занятого слота `t` запись `arena[slots[t]]` хешируется в `t`
///   функцией, соответствующей чётности `t`;
/// - каждая живая запись занимает ровно один слот;
/// - ключи уникальны.
#[derive(Debug, Clone)]
pub struct SmallCuckoo {
    slots: Vec<Slot>,
    arena: EntryArena,
    scheme: HashScheme,
    max_loops: usize,
    resizes: usize,
}

/// Снимок состояния индекса.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuckooStats {
    /// Число живых записей.
    pub entries: usize,
    /// Размер таблицы слотов.
    pub table_size: usize,
    /// Доля занятых слотов.
    pub load_factor: f64,
    /// Сколько раз таблица слотов удваивалась с момента создания или загрузки.
    pub resizes: usize,
}

/// Размер таблицы слотов для `n` записей: наименьшая степень двойки вида
/// `1 << (ceil_log2(n) + 1)`.
pub fn table_size_for(n: usize) -> usize {
    n.max(1).next_power_of_two() << 1
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl SmallCuckoo {
    /// Создаёт пустой индекс с подсказкой ёмкости и хешами по умолчанию.
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_scheme(initial_capacity, HashScheme::default(), DEFAULT_MAX_LOOPS)
    }

    /// Создаёт пустой индекс по загруженным настройкам.
    pub fn with_settings(settings: &CuckooSettings) -> Self {
        Self::with_scheme(
            settings.initial_capacity,
            settings.hash_scheme(),
            settings.max_loops,
        )
    }

    /// Создаёт пустой индекс с явной парой хеш-функций.
    ///
    /// Арена получает `initial_capacity + 1` позиций: столько записей
    /// помещается без перевыделения.
    pub fn with_scheme(
        initial_capacity: usize,
        scheme: HashScheme,
        max_loops: usize,
    ) -> Self {
        let table_size = table_size_for(initial_capacity);
        debug!(initial_capacity, table_size, ?scheme, "Creating cuckoo index");

        Self {
            slots: vec![None; table_size],
            arena: EntryArena::with_capacity(initial_capacity.saturating_add(1)),
            scheme,
            max_loops: max_loops.max(1),
            resizes: 0,
        }
    }

    /// Собирает индекс вокруг готовой арены и перестраивает таблицу слотов.
    pub(crate) fn from_arena(
        arena: EntryArena,
        scheme: HashScheme,
        max_loops: usize,
    ) -> Self {
        let mut table = Self {
            slots: vec![None; table_size_for(arena.n_entries())],
            arena,
            scheme,
            max_loops: max_loops.max(1),
            resizes: 0,
        };
        let indices: Vec<EntryIndex> = table.arena.indices().collect();
        for index in indices {
            table.place(index);
        }
        table
    }

    /// Вставляет пару `(key, value)`.
    ///
    /// Вставка всегда завершается успешно, при необходимости таблица
    /// растёт. Нарушение контракта (ключ уже есть или все 65534 индекса
    /// заняты) — фатальная ошибка; [`try_insert`](Self::try_insert)
    /// возвращает её как значение.
    pub fn insert(
        &mut self,
        key: u64,
        value: u64,
    ) {
        if let Err(err) = self.try_insert(key, value) {
            fatal!("insert rejected: {err}");
        }
    }

    /// Вставляет пару `(key, value)` или возвращает ошибку, не меняя индекс.
    ///
    /// # Errors
    /// - [`IndexError::DuplicateKey`], если ключ уже присутствует;
    /// - [`IndexError::CapacityExceeded`], если живых записей уже
    ///   [`MAX_ENTRIES`].
    pub fn try_insert(
        &mut self,
        key: u64,
        value: u64,
    ) -> CuckooResult<()> {
        ensure!(!self.contains_key(key), IndexError::DuplicateKey { key });

        let Some(index) = self.arena.push(Entry { key, value }) else {
            bail!(IndexError::CapacityExceeded {
                limit: MAX_ENTRIES,
                attempted: self.arena.len() + 1,
            });
        };
        self.place(index);

        Ok(())
    }

    /// Возвращает значение для `key` или `None`.
    ///
    /// Проверяет ровно два слота: по `h1` и по `h2`.
    pub fn find(
        &self,
        key: u64,
    ) -> Option<u64> {
        let size = self.slots.len();
        [self.scheme.h1(size, key), self.scheme.h2(size, key)]
            .into_iter()
            .filter_map(|slot| self.slot_entry(slot))
            .find(|entry| entry.key == key)
            .map(|entry| entry.value)
    }

    /// Проверяет наличие ключа.
    pub fn contains_key(
        &self,
        key: u64,
    ) -> bool {
        self.find(key).is_some()
    }

    /// Курсор по занятым слотам в порядке возрастания номера слота.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Количество живых записей.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the index holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Размер таблицы слотов.
    #[inline]
    pub fn table_size(&self) -> usize {
        self.slots.len()
    }

    /// Выделенная ёмкость арены (включая служебную позицию).
    #[inline]
    pub fn arena_capacity(&self) -> usize {
        self.arena.capacity()
    }

    #[inline]
    pub fn hash_scheme(&self) -> HashScheme {
        self.scheme
    }

    #[inline]
    pub fn max_loops(&self) -> usize {
        self.max_loops
    }

    /// Живые записи в порядке вставки.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        self.arena.live()
    }

    /// Точный размер дампа в байтах.
    pub fn serialized_len(&self) -> usize {
        2 + 16 * self.len()
    }

    pub fn stats(&self) -> CuckooStats {
        CuckooStats {
            entries: self.len(),
            table_size: self.table_size(),
            load_factor: self.len() as f64 / self.table_size() as f64,
            resizes: self.resizes,
        }
    }

    /// Полная проверка инвариантов таблицы слотов. Линейна по размеру
    /// таблицы; предназначена для тестов и проверки после загрузки.
    pub fn is_consistent(&self) -> bool {
        let size = self.slots.len();
        if !size.is_power_of_two() || size < 2 {
            return false;
        }

        let mut seen = vec![false; self.arena.n_entries()];
        for (slot, index) in self.slots.iter().enumerate() {
            let Some(index) = index else { continue };
            if index.get() >= self.arena.n_entries() || seen[index.get()] {
                return false;
            }
            seen[index.get()] = true;

            let key = self.arena.get(*index).key;
            let home = if slot % 2 == 0 {
                self.scheme.h1(size, key)
            } else {
                self.scheme.h2(size, key)
            };
            if home != slot {
                return false;
            }
        }

        seen.iter().skip(1).all(|&placed| placed)
    }

    /// Запись, на которую указывает слот, если он занят.
    #[inline]
    pub(crate) fn slot_entry(
        &self,
        slot: usize,
    ) -> Option<&Entry> {
        self.slots[slot].map(|index| self.arena.get(index))
    }

    /// Размещает запись арены в таблице, удваивая таблицу, пока вытеснение
    /// не сойдётся.
    fn place(
        &mut self,
        index: EntryIndex,
    ) {
        let mut pending = index;
        while let Some(homeless) = self.displace(pending) {
            trace!(
                table_size = self.slots.len(),
                max_loops = self.max_loops,
                "Displacement exhausted, doubling slot table"
            );
            self.double_size();
            pending = homeless;
        }
    }

    /// Один проход вытеснения: до `max_loops` раундов обменов по `h1` и `h2`.
    /// Возвращает запись, оставшуюся без слота, если проход не сошёлся.
    fn displace(
        &mut self,
        mut carried: EntryIndex,
    ) -> Option<EntryIndex> {
        let size = self.slots.len();
        for _ in 0..self.max_loops {
            let slot = self.scheme.h1(size, self.arena.get(carried).key);
            match self.slots[slot].replace(carried) {
                None => return None,
                Some(evicted) => carried = evicted,
            }

            let slot = self.scheme.h2(size, self.arena.get(carried).key);
            match self.slots[slot].replace(carried) {
                None => return None,
                Some(evicted) => carried = evicted,
            }
        }
        Some(carried)
    }

    /// Удваивает таблицу слотов и заново размещает всех её обитателей.
    ///
    /// Вложенные вставки сами могут вызвать удвоение: тогда старый массив
    /// дочитывается уже в более крупную таблицу.
    fn double_size(&mut self) {
        let new_size = self.slots.len() << 1;
        if new_size > MAX_TABLE_SIZE {
            fatal!(
                "{}",
                IndexError::NoConvergence {
                    table_size: self.slots.len()
                }
            );
        }

        let previous = std::mem::replace(&mut self.slots, vec![None; new_size]);
        self.resizes += 1;
        debug!(
            old_size = previous.len(),
            new_size,
            entries = self.len(),
            "Slot table doubled"
        );

        for index in previous.into_iter().flatten() {
            self.place(index);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для SmallCuckoo
////////////////////////////////////////////////////////////////////////////////

impl Default for SmallCuckoo {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PartialEq for SmallCuckoo {
    /// Два индекса равны, если содержат одинаковые пары независимо от
    /// раскладки слотов и порядка вставки.
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.len() == other.len()
            && self
                .entries()
                .iter()
                .all(|e| other.find(e.key) == Some(e.value))
    }
}

impl<'a> IntoIterator for &'a SmallCuckoo {
    type Item = (u64, u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<(u64, u64)> for SmallCuckoo {
    fn extend<T: IntoIterator<Item = (u64, u64)>>(
        &mut self,
        iter: T,
    ) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl FromIterator<(u64, u64)> for SmallCuckoo {
    fn from_iter<T: IntoIterator<Item = (u64, u64)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut table = SmallCuckoo::new(iter.size_hint().0.min(MAX_ENTRIES));
        table.extend(iter);
        table
    }
}
