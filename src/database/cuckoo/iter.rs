//! Однопроходный курсор по таблице слотов.

use std::iter::FusedIterator;

use super::cuckoo_base::SmallCuckoo;
use crate::fatal::fatal;

/// Курсор по занятым слотам `0..table_size`.
///
/// Порядок обхода — порядок номеров слотов, т.е. артефакт текущей раскладки,
/// а не порядок вставки и не порядок ключей. Курсор держит разделяемую
/// ссылку на индекс, поэтому вставка во время обхода не скомпилируется.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    table: &'a SmallCuckoo,
    cursor: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(table: &'a SmallCuckoo) -> Self {
        Self { table, cursor: 0 }
    }

    /// Есть ли ещё занятые слоты. Пропускает пустые слоты, но не потребляет
    /// найденный; повторные вызовы идемпотентны.
    pub fn has_next(&mut self) -> bool {
        while self.cursor < self.table.table_size() {
            if self.table.slot_entry(self.cursor).is_some() {
                return true;
            }
            self.cursor += 1;
        }
        false
    }

    /// Возвращает следующую пару и сдвигает курсор за неё.
    ///
    /// Вызов на исчерпанном курсоре — нарушение контракта и фатальная
    /// ошибка: сначала нужно проверить [`has_next`](Self::has_next).
    pub fn advance(&mut self) -> (u64, u64) {
        match self.next() {
            Some(pair) => pair,
            None => fatal!(
                "iterator advanced past the last occupied slot (table size {})",
                self.table.table_size()
            ),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.table.table_size() {
            let slot = self.cursor;
            self.cursor += 1;
            if let Some(entry) = self.table.slot_entry(slot) {
                return Some((entry.key, entry.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining_slots = self.table.table_size() - self.cursor;
        (0, Some(remaining_slots.min(self.table.len())))
    }
}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Проверяет явный протокол has_next/advance на полном проходе.
    #[test]
    fn test_has_next_advance_protocol() {
        let mut t = SmallCuckoo::new(0);
        for k in 1..=5u64 {
            t.insert(k, k * 10);
        }

        let mut it = t.iter();
        let mut seen = HashSet::new();
        while it.has_next() {
            assert!(it.has_next(), "has_next must be idempotent");
            let (k, v) = it.advance();
            assert_eq!(v, k * 10);
            assert!(seen.insert(k), "key {k} yielded twice");
        }
        assert_eq!(seen, (1..=5).collect());
        assert!(!it.has_next());
    }

    /// Проверяет, что обход идёт по возрастанию номеров слотов.
    #[test]
    fn test_order_follows_slots() {
        let t: SmallCuckoo = (0..64u64).map(|k| (k, k)).collect();
        let scheme = t.hash_scheme();
        let size = t.table_size();

        let slots: Vec<usize> = t
            .iter()
            .map(|(k, _)| {
                let a = scheme.h1(size, k);
                if t.slot_entry(a).map(|e| e.key) == Some(k) {
                    a
                } else {
                    scheme.h2(size, k)
                }
            })
            .collect();
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_table() {
        let t = SmallCuckoo::new(16);
        let mut it = t.iter();
        assert!(!it.has_next());
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    #[should_panic(expected = "fatal: iterator advanced past the last occupied slot")]
    fn test_advance_past_end_is_fatal() {
        let mut t = SmallCuckoo::new(0);
        t.insert(1, 1);
        let mut it = t.iter();
        it.advance();
        it.advance();
    }

    /// Проверяет, что новый курсор начинает обход заново.
    #[test]
    fn test_fresh_cursor_restarts() {
        let t: SmallCuckoo = (0..10u64).map(|k| (k, k)).collect();
        let first: Vec<_> = t.iter().collect();
        let second: Vec<_> = (&t).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }
}
