use std::{collections::HashSet, io::Read};

use byteorder::{LittleEndian, ReadBytesExt};
use small_cuckoo_error::{bail, CuckooResult, DumpError, ResultExt};
use tracing::debug;

use super::{ENTRY_LEN, HEADER_LEN};
use crate::database::{
    cuckoo::entry::{Entry, EntryArena},
    HashScheme, SmallCuckoo, DEFAULT_MAX_LOOPS,
};

/// Читает дамп индекса из `r` с хешами по умолчанию.
///
/// Читается ровно `HEADER_LEN + ENTRY_LEN * (n_entries - 1)` байт; всё, что
/// лежит в `r` дальше, не трогается.
pub fn read_index<R: Read>(r: &mut R) -> CuckooResult<SmallCuckoo> {
    read_index_with(r, HashScheme::default(), DEFAULT_MAX_LOOPS)
}

/// Читает дамп индекса из `r` и раскладывает записи заданной парой
/// хеш-функций.
///
/// Арена получает ёмкость ровно `n_entries`, таблица слотов —
/// `table_size_for(n_entries)`; если при перестройке вытеснение не сойдётся,
/// таблица вырастет как при обычной вставке.
///
/// # Errors
/// - `UnexpectedEof` — данных меньше, чем обещает заголовок;
/// - [`DumpError::CorruptedData`] — `n_entries == 0` или повтор ключа.
pub fn read_index_with<R: Read>(
    r: &mut R,
    scheme: HashScheme,
    max_loops: usize,
) -> CuckooResult<SmallCuckoo> {
    let n_entries = r
        .read_u16::<LittleEndian>()
        .context("Failed to read dump header")? as usize;

    if n_entries == 0 {
        bail!(DumpError::CorruptedData {
            reason: "n_entries is zero, the reserved position is missing".to_string(),
            offset: Some(0),
        });
    }

    let mut arena = EntryArena::with_capacity(n_entries);
    let mut seen = HashSet::with_capacity(n_entries - 1);

    for position in 1..n_entries {
        let key = r
            .read_u64::<LittleEndian>()
            .with_context(|| format!("Failed to read key of entry {position}"))?;
        let value = r
            .read_u64::<LittleEndian>()
            .with_context(|| format!("Failed to read value of entry {position}"))?;

        if !seen.insert(key) {
            bail!(DumpError::CorruptedData {
                reason: format!("duplicate key {key:#018x}"),
                offset: Some(entry_offset(position)),
            });
        }
        if arena.push(Entry { key, value }).is_none() {
            bail!(DumpError::CorruptedData {
                reason: format!("entry {position} does not fit a 16-bit index"),
                offset: Some(entry_offset(position)),
            });
        }
    }

    let index = SmallCuckoo::from_arena(arena, scheme, max_loops);
    debug!(
        entries = index.len(),
        table_size = index.table_size(),
        "Index dump loaded"
    );
    Ok(index)
}

/// Смещение записи `position` (считая с 1) от начала дампа.
fn entry_offset(position: usize) -> u64 {
    (HEADER_LEN + ENTRY_LEN * (position - 1)) as u64
}

impl SmallCuckoo {
    /// Восстанавливает индекс из дампа. См. [`read_index`].
    pub fn deserialize<R: Read>(r: &mut R) -> CuckooResult<Self> {
        read_index(r)
    }

    /// Восстанавливает индекс из дампа с явной парой хеш-функций.
    pub fn deserialize_with<R: Read>(
        r: &mut R,
        scheme: HashScheme,
        max_loops: usize,
    ) -> CuckooResult<Self> {
        read_index_with(r, scheme, max_loops)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use small_cuckoo_error::StatusCode;

    use super::*;
    use crate::database::{KeyMixing, SecondHash};

    fn dump_of(pairs: &[(u64, u64)]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&((pairs.len() + 1) as u16).to_le_bytes());
        for (k, v) in pairs {
            buf.extend_from_slice(&k.to_le_bytes());
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    /// Тест проверяет чтение дампа, собранного вручную.
    #[test]
    fn test_read_handmade_dump() {
        let bytes = dump_of(&[(1, 10), (2, 20), (3, 30)]);
        let index = read_index(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.find(2), Some(20));
        assert_eq!(index.arena_capacity(), 4);
        assert_eq!(index.table_size(), 8);
        assert!(index.is_consistent());
    }

    /// Тест проверяет, что дамп только из заголовка даёт пустой индекс.
    #[test]
    fn test_read_empty_dump() {
        let index = read_index(&mut Cursor::new([1u8, 0])).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.table_size(), 2);
    }

    /// Тест проверяет, что нулевой заголовок считается повреждением.
    #[test]
    fn test_zero_header() {
        let err = read_index(&mut Cursor::new([0u8, 0])).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CorruptedData);
        assert!(err.to_string().contains("at offset 0"));
    }

    /// Тест проверяет пустой вход.
    #[test]
    fn test_no_header() {
        let err = read_index(&mut Cursor::new(Vec::<u8>::new())).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UnexpectedEof);
        assert_eq!(err.contexts()[0].message, "Failed to read dump header");
    }

    /// Тест проверяет обрыв посреди записи.
    #[test]
    fn test_truncated_entry() {
        let mut bytes = dump_of(&[(1, 10), (2, 20)]);
        bytes.truncate(bytes.len() - 3);

        let err = read_index(&mut Cursor::new(bytes)).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UnexpectedEof);
        assert!(err.to_string().contains("value of entry 2"));
    }

    /// Тест проверяет, что повтор ключа отвергается со смещением записи.
    #[test]
    fn test_duplicate_key() {
        let bytes = dump_of(&[(7, 1), (8, 2), (7, 3)]);
        let err = read_index(&mut Cursor::new(bytes)).unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CorruptedData);
        match err.downcast_ref::<DumpError>() {
            Some(DumpError::CorruptedData { offset, .. }) => assert_eq!(*offset, Some(34)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Тест проверяет, что хвост после дампа остаётся в читателе.
    #[test]
    fn test_leaves_trailing_bytes_unread() {
        let mut bytes = dump_of(&[(5, 50)]);
        bytes.extend_from_slice(b"tail");

        let mut cursor = Cursor::new(bytes);
        let index = read_index(&mut cursor).unwrap();
        assert_eq!(index.find(5), Some(50));
        assert_eq!(cursor.position(), 18);
    }

    /// Тест проверяет загрузку с другой парой хеш-функций.
    #[test]
    fn test_deserialize_with_scheme() {
        let original: SmallCuckoo = (0..300u64).map(|k| (k << 40 | k, k)).collect();
        let mut buf = Vec::new();
        original.serialize(&mut buf).unwrap();

        let scheme = HashScheme::new(KeyMixing::Full, SecondHash::Jenkins);
        let restored = SmallCuckoo::deserialize_with(&mut Cursor::new(buf), scheme, 8).unwrap();

        assert_eq!(restored.hash_scheme(), scheme);
        assert_eq!(restored.max_loops(), 8);
        assert_eq!(restored, original);
        assert!(restored.is_consistent());
    }
}
