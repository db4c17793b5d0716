#![no_main]

use std::io::Cursor;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use small_cuckoo::{HashScheme, KeyMixing, SecondHash, SmallCuckoo};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    data: Vec<u8>,
    full_mixing: bool,
    jenkins: bool,
    max_loops: u8,
}

fuzz_target!(|input: FuzzInput| {
    let scheme = HashScheme::new(
        if input.full_mixing {
            KeyMixing::Full
        } else {
            KeyMixing::Compat
        },
        if input.jenkins {
            SecondHash::Jenkins
        } else {
            SecondHash::Crc32c
        },
    );
    let max_loops = usize::from(input.max_loops).max(1);

    // Декодер не должен паниковать ни на каких данных: плохой дамп — это Err.
    let mut cursor = Cursor::new(&input.data);
    let Ok(index) = SmallCuckoo::deserialize_with(&mut cursor, scheme, max_loops) else {
        return;
    };

    assert!(index.is_consistent());
    for entry in index.entries() {
        assert_eq!(index.find(entry.key), Some(entry.value));
    }

    // Повторная сериализация даёт ровно прочитанный префикс
    let mut buf = Vec::new();
    index.serialize(&mut buf).expect("encoding into a Vec cannot fail");
    assert_eq!(&buf[..], &input.data[..cursor.position() as usize]);
});
