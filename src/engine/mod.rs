//! Хранение индекса вне памяти.

pub mod dump;

pub use dump::{
    load_from_path, load_from_path_with, read_index, read_index_with, save_to_path, write_index,
};
