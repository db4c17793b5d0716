/// Index settings loading.
pub mod config;
/// The cuckoo index itself: slots, entry arena, hash functions, iteration.
pub mod database;
/// Index dumps: encoding, decoding, file persistence.
pub mod engine;
/// Fatal-error macros for contract violations.
mod fatal;
/// Flexible logging (formatting, filters, sinks).
pub mod logging;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Settings
pub use config::{CuckooSettings, SettingsError};
/// Index, entries, hash functions and limits.
pub use database::{
    evaluate_hash_quality, table_size_for, CuckooStats, Entry, EntryIndex, HashScheme, Iter,
    KeyMixing, SecondHash, SmallCuckoo, DEFAULT_MAX_LOOPS, MAX_ENTRIES, MAX_TABLE_SIZE,
};
/// Dump functions.
pub use engine::{
    load_from_path, load_from_path_with, read_index, read_index_with, save_to_path, write_index,
};
/// Logging setup.
pub use logging::{init_logging, LoggingConfig, LoggingHandle};
/// Error types and result alias.
pub use small_cuckoo_error::{
    CuckooResult, DumpError, ErrorExt, IndexError, ResultExt, StackError, StatusCode,
};
