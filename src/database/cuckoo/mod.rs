pub mod cuckoo_base;
pub mod entry;
pub mod hash;
pub mod iter;
pub mod slot;

// Publicly re-export the index types from the submodules to simplify access
// from external code.
pub use cuckoo_base::*;
pub use entry::Entry;
pub use hash::{evaluate_hash_quality, HashScheme, KeyMixing, SecondHash};
pub use iter::Iter;
pub use slot::{EntryIndex, Slot, MAX_ENTRIES};
