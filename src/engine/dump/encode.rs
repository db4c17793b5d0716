use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use small_cuckoo_error::{CuckooResult, ResultExt};
use tracing::debug;

use crate::{database::SmallCuckoo, fatal::ensure_fatal};

/// Записывает дамп индекса в `w`.
///
/// Пишутся только записи арены в порядке вставки; таблица слотов не
/// сохраняется.
///
/// # Errors
/// Ошибка записи (в том числе короткая запись, `WriteZero`) возвращается с
/// контекстом — какая часть дампа не записалась.
pub fn write_index<W: Write>(
    w: &mut W,
    index: &SmallCuckoo,
) -> CuckooResult<()> {
    let n_entries = u16::try_from(index.len() + 1).unwrap_or(0);
    ensure_fatal!(
        n_entries != 0,
        "index holds {} entries, more than a 16-bit header can describe",
        index.len()
    );

    w.write_u16::<LittleEndian>(n_entries)
        .context("Failed to write dump header")?;

    for (i, entry) in index.entries().iter().enumerate() {
        w.write_u64::<LittleEndian>(entry.key)
            .with_context(|| format!("Failed to write key of entry {}", i + 1))?;
        w.write_u64::<LittleEndian>(entry.value)
            .with_context(|| format!("Failed to write value of entry {}", i + 1))?;
    }

    debug!(
        entries = index.len(),
        bytes = index.serialized_len(),
        "Index dump written"
    );
    Ok(())
}

impl SmallCuckoo {
    /// Сериализует индекс в `w`. См. [`write_index`].
    pub fn serialize<W: Write>(
        &self,
        w: &mut W,
    ) -> CuckooResult<()> {
        write_index(w, self)
    }
}
