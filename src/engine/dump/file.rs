use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use small_cuckoo_error::{bail, CuckooResult, DumpError, ResultExt};
use tempfile::NamedTempFile;
use tracing::info;

use super::{read_index_with, write_index};
use crate::database::{HashScheme, SmallCuckoo, DEFAULT_MAX_LOOPS};

/// Сохраняет дамп в файл атомарно: запись идёт во временный файл в той же
/// директории, затем `fsync` и замена целевого файла.
pub fn save_to_path<P: AsRef<Path>>(
    index: &SmallCuckoo,
    path: P,
) -> CuckooResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // 1. Временный файл рядом с целевым, чтобы замена была в пределах одной ФС.
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary dump in {}", dir.display()))?;

    // 2. Пишем дамп через буфер.
    let mut w = BufWriter::new(tmp);
    write_index(&mut w, index)?;
    let tmp = w
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush index dump")?;
    tmp.as_file()
        .sync_all()
        .context("Failed to sync index dump")?;

    // 3. Атомарно заменяем старый файл.
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move dump into {}", path.display()))?;

    info!(path = %path.display(), entries = index.len(), "Index saved");
    Ok(())
}

/// Загружает индекс из файла с хешами по умолчанию.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> CuckooResult<SmallCuckoo> {
    load_from_path_with(path, HashScheme::default(), DEFAULT_MAX_LOOPS)
}

/// Загружает индекс из файла. Файл должен содержать ровно один дамп: лишние
/// байты после последней записи — [`DumpError::TrailingBytes`].
pub fn load_from_path_with<P: AsRef<Path>>(
    path: P,
    scheme: HashScheme,
    max_loops: usize,
) -> CuckooResult<SmallCuckoo> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let got = file
        .metadata()
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();

    let mut r = BufReader::new(file);
    let index = read_index_with(&mut r, scheme, max_loops)
        .with_context(|| format!("Failed to load index from {}", path.display()))?;

    let mut probe = [0u8; 1];
    let extra = r
        .read(&mut probe)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if extra != 0 {
        bail!(DumpError::TrailingBytes {
            expected: index.serialized_len() as u64,
            got,
        });
    }

    info!(path = %path.display(), entries = index.len(), "Index loaded");
    Ok(index)
}
